//! Session registry and lifecycle control for wagate.
//!
//! One session per linked device identity: the registry owns the key → handle
//! mapping, the manager drives linking (QR / pairing code), connect /
//! reconnect / logout transitions, outbound message dispatch wrapped in
//! presence signaling, and group membership operations.  Everything network-
//! facing goes through the `wagate-network` capability traits.

pub mod dispatch;
pub mod groups;
pub mod linking;
pub mod manager;
pub mod presence;
pub mod registry;
pub mod resolve;

pub use dispatch::MessageContent;
pub use linking::LoginOutcome;
pub use manager::SessionManager;
pub use registry::{SessionHandle, SessionRegistry};
pub use resolve::resolve_address;
