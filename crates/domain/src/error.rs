/// Shared error type used across all wagate crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No session handle is registered for the given key.
    #[error("no session registered for key {0}")]
    InvalidSession(String),

    #[error("session transport is not connected")]
    NotConnected,

    #[error("session is not logged in")]
    NotLoggedIn,

    /// An individual address was not found on the network.
    #[error("address {0} is not registered on the network")]
    NotRegistered(String),

    /// An operation required a group address but got an individual one.
    #[error("address {0} is not a group")]
    NotAGroup(String),

    #[error("empty address")]
    EmptyAddress,

    /// Transport or pairing failure during a device-linking flow.
    #[error("linking: {0}")]
    Linking(String),

    /// Message submission failure (including caller cancellation).
    #[error("send: {0}")]
    Send(String),

    /// Logout fallback store-delete failed; the session handle is kept
    /// registered so the caller can retry.
    #[error("device store inconsistent after logout: {0}")]
    StoreInconsistent(String),

    #[error("network: {0}")]
    Network(String),

    #[error("store: {0}")]
    Store(String),

    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
