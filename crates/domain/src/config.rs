//! Process configuration.
//!
//! Read once at startup, either from a serde source (TOML/JSON) or from the
//! environment via [`Config::from_env`].  Missing protocol version
//! components are silently omitted; missing datastore parameters are a
//! startup error surfaced as `Error::Config`, never a process abort.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub datastore: DatastoreConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub linking: LinkingConfig,
    /// Optional outbound proxy URL for the network transport.
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Config {
    /// Build the configuration from `WAGATE_*` environment variables.
    ///
    /// `WAGATE_DATASTORE_TYPE` and `WAGATE_DATASTORE_URI` are required;
    /// everything else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let backend = require_env("WAGATE_DATASTORE_TYPE")?;
        let uri = require_env("WAGATE_DATASTORE_URI")?;

        Ok(Self {
            datastore: DatastoreConfig { backend, uri },
            device: DeviceConfig {
                user_agent: optional_env("WAGATE_USER_AGENT")
                    .unwrap_or_else(d_user_agent),
                version: ProtocolVersion {
                    major: optional_env_u32("WAGATE_VERSION_MAJOR"),
                    minor: optional_env_u32("WAGATE_VERSION_MINOR"),
                    patch: optional_env_u32("WAGATE_VERSION_PATCH"),
                },
            },
            linking: LinkingConfig::default(),
            proxy_url: optional_env("WAGATE_PROXY_URL"),
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Datastore
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Connection parameters for the external device store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatastoreConfig {
    /// Store backend identifier (e.g. `"sqlite3"`, `"postgres"`).
    pub backend: String,
    /// Backend-specific connection URI.
    pub uri: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Device metadata
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Device metadata advertised to the network on registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Platform/user-agent variant label (e.g. `"chrome"`, `"firefox"`).
    #[serde(default = "d_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub version: ProtocolVersion,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            user_agent: d_user_agent(),
            version: ProtocolVersion::default(),
        }
    }
}

/// Protocol version triple.  Components that are absent are simply not
/// advertised to the network.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProtocolVersion {
    #[serde(default)]
    pub major: Option<u32>,
    #[serde(default)]
    pub minor: Option<u32>,
    #[serde(default)]
    pub patch: Option<u32>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Linking
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkingConfig {
    /// Upper bound, in seconds, on waiting for the first QR code event
    /// after connecting.  The network client enforces its own rotation
    /// timeouts below this.
    #[serde(default = "d_qr_wait_secs")]
    pub qr_wait_secs: u64,
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            qr_wait_secs: d_qr_wait_secs(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Defaults & env helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn d_user_agent() -> String {
    "chrome".into()
}

fn d_qr_wait_secs() -> u64 {
    60
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!(
            "missing required environment variable {name}"
        ))),
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn optional_env_u32(name: &str) -> Option<u32> {
    optional_env(name).and_then(|v| v.trim().parse().ok())
}
