//! Live channel state: active selection, per-channel history, hydration
//! gating, and unread bookkeeping.
//!
//! Histories are append-only and keyed by channel id.  A channel does not
//! need to be registered anywhere before it can receive history: the entry
//! is created lazily on first append or first hydration claim, so a direct
//! channel that is not yet in the directory still accepts messages.

use std::collections::HashMap;

use tracing::debug;

use parley_shared::types::{ChannelId, Message};

/// What the presentation layer should do after an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendEffect {
    /// The message landed in the active channel: draw it now.
    Render,
    /// The message landed in a background channel: its unread badge is now set.
    Badge,
}

/// One channel's ordered history plus its bookkeeping flags.
#[derive(Debug, Default)]
struct ChannelHistory {
    messages: Vec<Message>,
    /// The one-time backlog load has completed.  Never reset.
    hydrated: bool,
    /// A backlog fetch is in flight.  Gates duplicate requests.
    hydrating: bool,
    /// Messages arrived while this channel was not active.
    unseen: bool,
}

/// The live model of every channel in the session.
#[derive(Debug)]
pub struct ChannelStore {
    active: ChannelId,
    histories: HashMap<ChannelId, ChannelHistory>,
}

impl ChannelStore {
    pub fn new(initial_active: ChannelId) -> Self {
        Self {
            active: initial_active,
            histories: HashMap::new(),
        }
    }

    /// The channel currently displayed to the user.
    pub fn active(&self) -> &ChannelId {
        &self.active
    }

    /// Make `channel` the active channel and clear its unseen flag.
    /// Safe to call with the already-active channel.
    pub fn set_active(&mut self, channel: &ChannelId) {
        if &self.active != channel {
            debug!(channel = %channel, "Switching active channel");
            self.active = channel.clone();
        }
        self.clear_unseen(channel);
    }

    /// Clear the unseen flag for `channel` without touching anything else.
    pub fn clear_unseen(&mut self, channel: &ChannelId) {
        if let Some(history) = self.histories.get_mut(channel) {
            history.unseen = false;
        }
    }

    /// Append a message to its channel's history in arrival order.
    ///
    /// No reordering and no deduplication: the transport promises per-source
    /// ordering, and duplication across the pull and push paths is accepted.
    pub fn append_message(&mut self, message: Message) -> AppendEffect {
        let is_active = message.channel == self.active;
        let history = self.histories.entry(message.channel.clone()).or_default();
        history.messages.push(message);

        if is_active {
            AppendEffect::Render
        } else {
            history.unseen = true;
            AppendEffect::Badge
        }
    }

    /// Ordered snapshot of a channel's history.  Unknown channels read as
    /// empty rather than an error.
    pub fn history(&self, channel: &ChannelId) -> &[Message] {
        self.histories
            .get(channel)
            .map(|h| h.messages.as_slice())
            .unwrap_or(&[])
    }

    /// Claim the one-time backlog fetch for `channel`.
    ///
    /// Returns `true` exactly when the caller should issue the fetch: the
    /// claim is recorded synchronously, so a second call before the first
    /// response arrives gets `false` and must not fetch again.
    pub fn begin_hydration(&mut self, channel: &ChannelId) -> bool {
        let history = self.histories.entry(channel.clone()).or_default();
        if history.hydrated || history.hydrating {
            return false;
        }
        history.hydrating = true;
        true
    }

    /// Resolve an earlier `begin_hydration` claim.
    ///
    /// On success the channel is marked hydrated for the rest of the
    /// session.  On failure the claim is released without marking, so the
    /// next visit to the channel may retry the fetch.
    pub fn finish_hydration(&mut self, channel: &ChannelId, success: bool) {
        if let Some(history) = self.histories.get_mut(channel) {
            history.hydrating = false;
            if success {
                history.hydrated = true;
            } else {
                debug!(channel = %channel, "Hydration failed, leaving channel eligible for retry");
            }
        }
    }

    pub fn is_hydrated(&self, channel: &ChannelId) -> bool {
        self.histories.get(channel).is_some_and(|h| h.hydrated)
    }

    pub fn has_unseen(&self, channel: &ChannelId) -> bool {
        self.histories.get(channel).is_some_and(|h| h.unseen)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn msg(channel: &str, from: &str, body: &str) -> Message {
        Message {
            channel: ChannelId::new(channel),
            from: from.to_string(),
            body: body.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_append_preserves_arrival_order() {
        let mut store = ChannelStore::new(ChannelId::lobby());
        store.append_message(msg("lobby", "alexa", "first"));
        store.append_message(msg("lobby", "blake", "second"));
        store.append_message(msg("lobby", "alexa", "third"));

        let bodies: Vec<&str> = store
            .history(&ChannelId::lobby())
            .iter()
            .map(|m| m.body.as_str())
            .collect();
        assert_eq!(bodies, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_append_to_active_channel_renders() {
        let mut store = ChannelStore::new(ChannelId::lobby());
        let effect = store.append_message(msg("lobby", "alexa", "hi"));
        assert_eq!(effect, AppendEffect::Render);
        assert!(!store.has_unseen(&ChannelId::lobby()));
    }

    #[test]
    fn test_append_to_background_channel_badges() {
        let mut store = ChannelStore::new(ChannelId::lobby());
        let effect = store.append_message(msg("gamers", "blake", "gg"));
        assert_eq!(effect, AppendEffect::Badge);
        assert!(store.has_unseen(&ChannelId::new("gamers")));
    }

    #[test]
    fn test_switching_in_clears_unseen() {
        let mut store = ChannelStore::new(ChannelId::lobby());
        store.append_message(msg("gamers", "blake", "gg"));
        assert!(store.has_unseen(&ChannelId::new("gamers")));

        store.set_active(&ChannelId::new("gamers"));
        assert!(!store.has_unseen(&ChannelId::new("gamers")));

        // While active, new messages never set the flag.
        store.append_message(msg("gamers", "blake", "again"));
        assert!(!store.has_unseen(&ChannelId::new("gamers")));
    }

    #[test]
    fn test_set_active_is_idempotent() {
        let mut store = ChannelStore::new(ChannelId::lobby());
        store.set_active(&ChannelId::lobby());
        store.set_active(&ChannelId::lobby());
        assert_eq!(store.active(), &ChannelId::lobby());
    }

    #[test]
    fn test_hydration_claimed_at_most_once() {
        let mut store = ChannelStore::new(ChannelId::lobby());
        let lobby = ChannelId::lobby();

        assert!(store.begin_hydration(&lobby));
        // In flight: no duplicate request.
        assert!(!store.begin_hydration(&lobby));

        store.finish_hydration(&lobby, true);
        assert!(store.is_hydrated(&lobby));
        // Hydrated: never again this session.
        assert!(!store.begin_hydration(&lobby));
    }

    #[test]
    fn test_failed_hydration_allows_retry() {
        let mut store = ChannelStore::new(ChannelId::lobby());
        let gamers = ChannelId::new("gamers");

        assert!(store.begin_hydration(&gamers));
        store.finish_hydration(&gamers, false);

        assert!(!store.is_hydrated(&gamers));
        assert!(store.begin_hydration(&gamers));
    }

    #[test]
    fn test_unknown_channel_reads_empty() {
        let store = ChannelStore::new(ChannelId::lobby());
        assert!(store.history(&ChannelId::new("nowhere")).is_empty());
        assert!(!store.has_unseen(&ChannelId::new("nowhere")));
    }
}
