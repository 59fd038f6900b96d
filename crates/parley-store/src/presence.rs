//! Online/offline presence tracking.
//!
//! Membership reflects the most recently received status event per
//! username.  Direct-channel presence summaries are derived from this set
//! at render time rather than stored per channel.

use std::collections::HashSet;

use tracing::debug;

/// Usernames currently known to be online.
#[derive(Debug, Default, Clone)]
pub struct PresenceSet {
    online: HashSet<String>,
}

impl PresenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a status event, last event wins.
    ///
    /// Returns whether the displayed state actually changed; repeated
    /// identical updates and an offline event for a never-seen user both
    /// report `false` so callers can skip redundant render signals.
    pub fn set_status(&mut self, username: &str, online: bool) -> bool {
        let changed = if online {
            self.online.insert(username.to_string())
        } else {
            self.online.remove(username)
        };
        if changed {
            debug!(user = %username, online, "Presence changed");
        }
        changed
    }

    pub fn is_online(&self, username: &str) -> bool {
        self.online.contains(username)
    }

    pub fn online_count(&self) -> usize {
        self.online.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_event_wins() {
        let mut presence = PresenceSet::new();
        assert!(presence.set_status("alice", true));
        assert!(presence.is_online("alice"));

        assert!(presence.set_status("alice", false));
        assert!(!presence.is_online("alice"));
    }

    #[test]
    fn test_repeated_updates_are_idempotent() {
        let mut presence = PresenceSet::new();
        assert!(presence.set_status("alice", true));
        assert!(!presence.set_status("alice", true));
        assert_eq!(presence.online_count(), 1);
    }

    #[test]
    fn test_offline_for_unknown_user_is_a_no_op() {
        let mut presence = PresenceSet::new();
        assert!(!presence.set_status("alice", false));
        assert!(!presence.is_online("alice"));
        assert_eq!(presence.online_count(), 0);
    }
}
