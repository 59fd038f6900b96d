//! Static catalog of known channels and the friend roster.
//!
//! Built once from the startup configuration and read-only thereafter,
//! except for friend-roster growth when the server announces a new
//! relationship.

use std::collections::BTreeSet;

use tracing::debug;

use parley_shared::types::{ChannelId, GroupInfo};

/// Catalog of group channels and direct-message peers.
#[derive(Debug, Clone)]
pub struct ChannelDirectory {
    current_user: String,
    groups: Vec<GroupInfo>,
    friends: BTreeSet<String>,
}

impl ChannelDirectory {
    /// Build the directory from the startup configuration.
    pub fn new(
        current_user: impl Into<String>,
        groups: Vec<GroupInfo>,
        friends: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            current_user: current_user.into(),
            groups,
            friends: friends.into_iter().collect(),
        }
    }

    /// The username this session belongs to.
    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    /// Group channels in their configured order.
    pub fn list_groups(&self) -> &[GroupInfo] {
        &self.groups
    }

    /// Look up a group channel's metadata.
    pub fn lookup_group(&self, id: &ChannelId) -> Option<&GroupInfo> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// Friend usernames in sorted order.
    pub fn friends(&self) -> Vec<String> {
        self.friends.iter().cloned().collect()
    }

    pub fn is_friend(&self, username: &str) -> bool {
        self.friends.contains(username)
    }

    /// Add a newly announced friend.  Idempotent; returns whether the
    /// roster actually grew, so callers can skip a redundant re-render.
    pub fn add_friend(&mut self, username: &str) -> bool {
        let added = self.friends.insert(username.to_string());
        if added {
            debug!(friend = %username, "Friend added to roster");
        }
        added
    }
}
