//! Group membership operations.

use wagate_domain::error::{Error, Result};
use wagate_network::types::GroupInfo;

use crate::manager::SessionManager;
use crate::resolve::resolve_address;

impl SessionManager {
    /// Snapshot of every group the session has joined.
    pub async fn list_joined_groups(&self, key: &str) -> Result<Vec<GroupInfo>> {
        let handle = self.registry.handle(key)?;
        handle.ensure_ready()?;

        handle.client().joined_groups().await
    }

    /// Join a group from an invitation link, returning the joined group's
    /// canonical identifier.
    pub async fn join_by_invite_link(&self, key: &str, link: &str) -> Result<String> {
        let handle = self.registry.handle(key)?;
        handle.ensure_ready()?;

        let group_id = handle.client().join_group_with_link(link).await?;
        tracing::info!(session = %key, group = %group_id, "joined group from invite link");
        Ok(group_id)
    }

    /// Leave the group identified by `raw_group_id`.  The address must
    /// classify as a group.
    pub async fn leave_group(&self, key: &str, raw_group_id: &str) -> Result<()> {
        let handle = self.registry.handle(key)?;
        handle.ensure_ready()?;

        let address = resolve_address(&handle, raw_group_id).await?;
        if !address.is_group() {
            return Err(Error::NotAGroup(address.to_string()));
        }

        handle.client().leave_group(&address).await?;
        tracing::info!(session = %key, group = %address, "left group");
        Ok(())
    }
}
