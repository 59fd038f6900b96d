//! Presentation adapter boundary.
//!
//! The engine never draws anything itself; it narrates state transitions
//! through this trait and the real UI decides what a bubble or a badge
//! looks like.  The adapter also owns transient UI timing, such as
//! auto-clearing an error notice after
//! [`ERROR_NOTICE_SECS`](parley_shared::constants::ERROR_NOTICE_SECS).

use parley_shared::types::{ChannelId, GroupInfo, Message};
use parley_store::PresenceSet;

/// Sink for the rendering side effects the core produces.
pub trait ChannelView: Send {
    /// Redraw the transcript of the active channel from a history snapshot.
    fn render_active_channel(&mut self, history: &[Message]);

    /// Draw one newly arrived message in the active channel.
    fn append_bubble(&mut self, message: &Message);

    /// Show or clear a channel's unread badge.
    fn set_unread_badge(&mut self, channel: &ChannelId, present: bool);

    /// Update the presence summary line.  `is_error` marks a transient
    /// notice that the adapter clears on its own schedule.
    fn set_presence_text(&mut self, text: &str, is_error: bool);

    /// Update a friend's online dot.
    fn set_online_indicator(&mut self, username: &str, online: bool);

    /// Redraw the friend list (already sorted) with current statuses.
    fn render_friend_list(&mut self, friends: &[String], presence: &PresenceSet);

    /// Redraw the group channel list.
    fn render_group_list(&mut self, groups: &[GroupInfo]);
}

/// A view that renders nothing.  Useful for headless sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl ChannelView for NullView {
    fn render_active_channel(&mut self, _history: &[Message]) {}
    fn append_bubble(&mut self, _message: &Message) {}
    fn set_unread_badge(&mut self, _channel: &ChannelId, _present: bool) {}
    fn set_presence_text(&mut self, _text: &str, _is_error: bool) {}
    fn set_online_indicator(&mut self, _username: &str, _online: bool) {}
    fn render_friend_list(&mut self, _friends: &[String], _presence: &PresenceSet) {}
    fn render_group_list(&mut self, _groups: &[GroupInfo]) {}
}
