//! Process-wide session registry.
//!
//! Maps each session key to exactly one live or dormant [`SessionHandle`].
//! The registry is the single source of truth for "does a session exist"
//! and "is it connected"; callers never cache handles across requests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::Mutex;

use wagate_domain::config::Config;
use wagate_domain::error::{Error, Result};
use wagate_network::platform::{host_os_label, PlatformType};
use wagate_network::traits::{ClientFactory, DeviceStore, NetworkClient};
use wagate_network::types::{ClientSettings, DeviceProps};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session handle
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One session's connection to the messaging network.
///
/// Owned exclusively by the registry entry for its key; every operation
/// reaches it through a registry lookup.
pub struct SessionHandle {
    key: String,
    client: Arc<dyn NetworkClient>,
    created_at: DateTime<Utc>,
}

impl SessionHandle {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn client(&self) -> &Arc<dyn NetworkClient> {
        &self.client
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Gate for authenticated operations: the transport must be up and the
    /// session logged in before any side effect happens.
    pub fn ensure_ready(&self) -> Result<()> {
        if !self.client.is_connected() {
            return Err(Error::NotConnected);
        }
        if !self.client.is_logged_in() {
            return Err(Error::NotLoggedIn);
        }
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session registry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Shared key → handle mapping, accessed from concurrent request tasks.
///
/// Reads take the `RwLock` fast path; creation serializes on `create_gate`
/// with a second lookup inside, so two racing `get_or_create` calls for the
/// same new key construct exactly one client and one device record.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<SessionHandle>>>,
    create_gate: Mutex<()>,
    store: Arc<dyn DeviceStore>,
    factory: Arc<dyn ClientFactory>,
    config: Config,
}

impl SessionRegistry {
    pub fn new(
        config: Config,
        store: Arc<dyn DeviceStore>,
        factory: Arc<dyn ClientFactory>,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            create_gate: Mutex::new(()),
            store,
            factory,
            config,
        }
    }

    /// Look up the handle for `key`, if one is registered.
    pub fn get(&self, key: &str) -> Option<Arc<SessionHandle>> {
        self.sessions.read().get(key).cloned()
    }

    /// Look up the handle for `key`, failing with `InvalidSession` when
    /// none is registered.
    pub fn handle(&self, key: &str) -> Result<Arc<SessionHandle>> {
        self.get(key)
            .ok_or_else(|| Error::InvalidSession(key.to_owned()))
    }

    /// Return the existing handle for `key`, or construct one: the device
    /// record is fetched-or-created from the store and a client instance is
    /// built with the configured device metadata and behavior flags.
    /// Idempotent per key; an existing handle is never reconfigured.
    pub async fn get_or_create(&self, key: &str) -> Result<Arc<SessionHandle>> {
        // Fast path: handle already exists.
        if let Some(handle) = self.get(key) {
            return Ok(handle);
        }

        // Slow path: serialize creation and re-check, so a racing task that
        // lost the gate reuses the winner's handle.
        let _gate = self.create_gate.lock().await;
        if let Some(handle) = self.get(key) {
            return Ok(handle);
        }

        let record = self.store.load_or_create(key).await?;
        let client = self
            .factory
            .build(&record, self.client_settings())
            .await?;

        let handle = Arc::new(SessionHandle {
            key: key.to_owned(),
            client,
            created_at: Utc::now(),
        });
        self.sessions.write().insert(key.to_owned(), handle.clone());

        tracing::info!(session = %key, record = %record.id, "session handle created");
        Ok(handle)
    }

    /// Delete the entry for `key`.  Call only after the underlying
    /// transport has been torn down.
    pub fn remove(&self, key: &str) -> Option<Arc<SessionHandle>> {
        let removed = self.sessions.write().remove(key);
        if removed.is_some() {
            tracing::info!(session = %key, "session handle removed");
        }
        removed
    }

    /// `InvalidSession` when no handle exists, `NotConnected` when the
    /// transport is down, `NotLoggedIn` when unauthenticated, else Ok.
    pub fn is_healthy(&self, key: &str) -> Result<()> {
        self.handle(key)?.ensure_ready()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            props: DeviceProps {
                os: host_os_label().to_owned(),
                platform: PlatformType::from_label(&self.config.device.user_agent),
                version: self.config.device.version,
                require_full_sync: false,
            },
            proxy_url: self.config.proxy_url.clone(),
            auto_reconnect: true,
            auto_trust_identity: true,
            send_self_broadcast: false,
        }
    }
}
