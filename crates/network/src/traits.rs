//! Capability traits for the external messaging-network client and the
//! device store, in the style of provider adapters: the session core talks
//! only to these traits, never to a concrete protocol implementation.

use std::sync::Arc;

use tokio::sync::mpsc;

use wagate_domain::address::CanonicalAddress;
use wagate_domain::error::Result;

use crate::platform::PlatformType;
use crate::types::{
    ChatPresence, ChatPresenceMedia, ClientSettings, ContactMatch, DeviceRecord, GroupInfo,
    MessagePayload, Presence, QrEvent,
};

/// One live (or dormant) connection to the messaging network for a single
/// linked device identity.
///
/// Implementations are expected to be internally synchronized: `connect`,
/// `disconnect`, and `send_message` may be called from concurrent tasks.
#[async_trait::async_trait]
pub trait NetworkClient: Send + Sync {
    /// Open the transport.  Safe to call on an already-connected client.
    async fn connect(&self) -> Result<()>;

    /// Tear down the transport.  Never fails; a dead socket is already
    /// disconnected.
    async fn disconnect(&self);

    fn is_connected(&self) -> bool;

    fn is_logged_in(&self) -> bool;

    /// Whether a device identity (completed linking) exists in the
    /// underlying store for this client.
    fn has_device_identity(&self) -> bool;

    /// Open the code-delivery stream for a QR linking attempt.  Must be
    /// called before `connect`; the client emits [`QrEvent`]s until the
    /// device is linked or the attempt expires.
    async fn qr_channel(&self) -> Result<mpsc::Receiver<QrEvent>>;

    /// Request a numeric pairing code for `phone`, displayed on the primary
    /// device under `display_label`.
    async fn pair_phone(
        &self,
        phone: &str,
        show_push_notification: bool,
        client_type: PlatformType,
        display_label: &str,
    ) -> Result<String>;

    /// Query which of the given `+`-prefixed numbers have an account on the
    /// network.
    async fn is_on_network(&self, numbers: &[String]) -> Result<Vec<ContactMatch>>;

    async fn send_presence(&self, presence: Presence) -> Result<()>;

    async fn send_chat_presence(
        &self,
        target: &CanonicalAddress,
        state: ChatPresence,
        media: ChatPresenceMedia,
    ) -> Result<()>;

    /// Generate a fresh unique message identifier.
    fn generate_message_id(&self) -> String;

    async fn send_message(
        &self,
        target: &CanonicalAddress,
        payload: MessagePayload,
        message_id: &str,
    ) -> Result<()>;

    async fn joined_groups(&self) -> Result<Vec<GroupInfo>>;

    /// Join a group via an invitation link, returning the joined group's
    /// canonical identifier.
    async fn join_group_with_link(&self, link: &str) -> Result<String>;

    async fn leave_group(&self, group: &CanonicalAddress) -> Result<()>;

    /// Unlink this device on the network side and disconnect.
    async fn logout(&self) -> Result<()>;
}

/// Persistent store of device records (identity + cryptographic material).
#[async_trait::async_trait]
pub trait DeviceStore: Send + Sync {
    /// Fetch the device record for `key`, creating a blank one when none
    /// exists yet.
    async fn load_or_create(&self, key: &str) -> Result<DeviceRecord>;

    /// Delete the device record for `key`.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Constructs [`NetworkClient`] instances bound to a device record.
#[async_trait::async_trait]
pub trait ClientFactory: Send + Sync {
    async fn build(
        &self,
        record: &DeviceRecord,
        settings: ClientSettings,
    ) -> Result<Arc<dyn NetworkClient>>;
}
