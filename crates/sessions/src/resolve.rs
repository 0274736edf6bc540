//! Registration validation — the single gate in front of every outbound
//! action and group-leave.

use wagate_domain::address::CanonicalAddress;
use wagate_domain::error::{Error, Result};

use crate::registry::SessionHandle;

/// Normalize `raw` and, for individual addresses, require a positive
/// is-on-network match.  Group addresses pass through untouched; group
/// membership is validated by the operation itself failing.
pub async fn resolve_address(handle: &SessionHandle, raw: &str) -> Result<CanonicalAddress> {
    let address = CanonicalAddress::parse(raw)?;
    if address.is_group() {
        return Ok(address);
    }

    let query = format!("+{}", address.local());
    let matches = handle
        .client()
        .is_on_network(std::slice::from_ref(&query))
        .await?;

    match matches.first() {
        Some(m) if m.is_registered => Ok(address),
        _ => Err(Error::NotRegistered(address.to_string())),
    }
}
