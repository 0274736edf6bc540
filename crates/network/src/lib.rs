//! External messaging-network capability seam.
//!
//! wagate is a pure orchestration layer: the wire protocol, credential
//! storage, and transport all live behind the traits defined here.  A real
//! deployment plugs in an actual protocol client; tests plug in fakes.

pub mod platform;
pub mod traits;
pub mod types;

pub use platform::{host_os_label, PlatformType};
pub use traits::{ClientFactory, DeviceStore, NetworkClient};
pub use types::{
    ChatPresence, ChatPresenceMedia, ClientSettings, ContactMatch, DeviceProps, DeviceRecord,
    GroupInfo, MessagePayload, Presence, QrEvent,
};
