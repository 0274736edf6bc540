//! Shared domain types for wagate: the crate-wide error type, canonical
//! network addresses, and process configuration.

pub mod address;
pub mod config;
pub mod error;

pub use address::{AddressKind, CanonicalAddress};
pub use config::Config;
pub use error::{Error, Result};
