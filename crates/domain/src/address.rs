//! Canonical network addresses.
//!
//! Raw identity strings arrive in several shapes — bare phone numbers,
//! `+`-prefixed numbers, fully-qualified `<id>@<server>` forms, and legacy
//! `-`-separated group IDs.  `CanonicalAddress::parse` folds them all into
//! one immutable value classified as Individual or Group.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Server suffix for individual (personal) addresses.
pub const INDIVIDUAL_SERVER: &str = "s.whatsapp.net";
/// Server suffix for group addresses.
pub const GROUP_SERVER: &str = "g.us";

/// Group IDs are at least this many digits; anything shorter without the
/// legacy `-` separator is an individual number.
const GROUP_ID_MIN_LEN: usize = 18;

/// Domain classification of a canonical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Individual,
    Group,
}

/// A normalized identity: the digits-only local part plus its
/// Individual/Group classification.  Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalAddress {
    local: String,
    kind: AddressKind,
}

impl CanonicalAddress {
    /// Parse a raw identity string into a canonical address.
    ///
    /// Strips everything from the first `@` onward, then a single leading
    /// `+`.  The remainder classifies as Group when it contains the legacy
    /// group separator `-` or is at least 18 characters long; otherwise it
    /// is an Individual address.  Only empty input fails.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::EmptyAddress);
        }

        let local = raw.split('@').next().unwrap_or(raw);
        let local = local.strip_prefix('+').unwrap_or(local);
        if local.is_empty() {
            return Err(Error::EmptyAddress);
        }

        let kind = if local.contains('-') || local.len() >= GROUP_ID_MIN_LEN {
            AddressKind::Group
        } else {
            AddressKind::Individual
        };

        Ok(Self {
            local: local.to_owned(),
            kind,
        })
    }

    /// The digits-only local part, without server suffix or `+` prefix.
    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn is_group(&self) -> bool {
        self.kind == AddressKind::Group
    }

    /// The server suffix implied by the classification.
    pub fn server(&self) -> &'static str {
        match self.kind {
            AddressKind::Individual => INDIVIDUAL_SERVER,
            AddressKind::Group => GROUP_SERVER,
        }
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local, self.server())
    }
}
