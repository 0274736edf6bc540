//! Value types crossing the network-client boundary.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wagate_domain::address::CanonicalAddress;
use wagate_domain::config::ProtocolVersion;

use crate::platform::PlatformType;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Device linking
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Opaque handle to a persisted device record in the external store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Store-assigned record identifier.
    pub id: String,
    /// Session key the record belongs to.
    pub key: String,
}

/// Device metadata advertised to the network on registration.
#[derive(Debug, Clone)]
pub struct DeviceProps {
    /// Operating-system label shown in the linked-devices list.
    pub os: String,
    pub platform: PlatformType,
    /// Protocol version triple; absent components are not advertised.
    pub version: ProtocolVersion,
    pub require_full_sync: bool,
}

/// Behavior flags a client instance is constructed with.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub props: DeviceProps,
    pub proxy_url: Option<String>,
    pub auto_reconnect: bool,
    pub auto_trust_identity: bool,
    /// When `false`, outbound messages are not broadcast back to the
    /// sender's other linked devices.
    pub send_self_broadcast: bool,
}

/// One event on the QR code-delivery stream during a linking attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrEvent {
    /// A fresh code to render; valid for `timeout`.
    Code { code: String, timeout: Duration },
    /// The current code expired without being scanned.
    Timeout,
    /// The device was linked successfully.
    Success,
    Error(String),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Presence
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Available,
    Unavailable,
}

/// Per-conversation composing indicator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPresence {
    Composing,
    Paused,
}

/// Medium shown while composing: typing (text) or recording (audio).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPresenceMedia {
    Text,
    Audio,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Registration lookup
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Result entry of an is-on-network query for one queried number.
#[derive(Debug, Clone)]
pub struct ContactMatch {
    /// The number as queried (with `+` prefix).
    pub query: String,
    /// Whether the number has an account on the network.
    pub is_registered: bool,
    /// Canonical address of the account, when registered.
    pub address: Option<CanonicalAddress>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Outbound payloads
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Wire-level content of an outbound message, keyed by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagePayload {
    /// Plain text body.
    Conversation(String),
    Location {
        latitude: f64,
        longitude: f64,
    },
    Contact {
        display_name: String,
        vcard: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Groups
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Snapshot of one joined group as reported by the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Canonical group identifier (e.g. `1203456789-1234@g.us`).
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub topic: Option<String>,
    /// Address of the group owner, when known.
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    pub created_at: DateTime<Utc>,
}
