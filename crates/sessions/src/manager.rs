//! Facade over the registry exposed to the request layer.
//!
//! The manager carries the registry plus the collaborators the lifecycle
//! flows need directly (device store for the logout fallback, config for
//! linking timeouts).  The operation groups live in their own modules:
//! [`crate::linking`], [`crate::dispatch`], [`crate::groups`].

use std::sync::Arc;

use wagate_domain::address::CanonicalAddress;
use wagate_domain::config::Config;
use wagate_domain::error::{Error, Result};
use wagate_network::traits::{ClientFactory, DeviceStore};

use crate::registry::{SessionHandle, SessionRegistry};
use crate::resolve::resolve_address;

pub struct SessionManager {
    pub(crate) registry: SessionRegistry,
    pub(crate) store: Arc<dyn DeviceStore>,
    pub(crate) config: Config,
}

impl SessionManager {
    pub fn new(
        config: Config,
        store: Arc<dyn DeviceStore>,
        factory: Arc<dyn ClientFactory>,
    ) -> Self {
        let registry = SessionRegistry::new(config.clone(), store.clone(), factory);
        Self {
            registry,
            store,
            config,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Resolve or construct the session handle for `key`.
    pub async fn get_or_create(&self, key: &str) -> Result<Arc<SessionHandle>> {
        self.registry.get_or_create(key).await
    }

    /// Health gate for authenticated operations.
    pub fn is_healthy(&self, key: &str) -> Result<()> {
        self.registry.is_healthy(key)
    }

    /// Standalone registration probe: succeeds only for an individual
    /// address with an account on the network.
    pub async fn check_registered(&self, key: &str, raw: &str) -> Result<CanonicalAddress> {
        let handle = self.registry.handle(key)?;
        handle.ensure_ready()?;

        let address = resolve_address(&handle, raw).await?;
        if address.is_group() {
            return Err(Error::NotRegistered(address.to_string()));
        }
        Ok(address)
    }
}
