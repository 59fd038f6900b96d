//! The sync engine: single owner of the channel store, fed by the session
//! event loop.
//!
//! Push handlers are independent and order-insensitive relative to each
//! other.  The pull path spawns the actual fetch and gets its result back
//! through the session loop as a [`FetchOutcome`], so every store mutation
//! still happens on the one logical thread.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use parley_shared::protocol::{ClientEvent, HistoryResponse, ServerEvent};
use parley_shared::types::{ChannelId, Message};
use parley_store::{AppendEffect, ChannelDirectory, ChannelStore, PresenceSet};

use crate::error::SyncError;
use crate::fetch::HistorySource;
use crate::view::ChannelView;

/// Result of a backlog fetch, routed back into the session loop.
#[derive(Debug)]
pub struct FetchOutcome {
    pub channel: ChannelId,
    pub result: Result<HistoryResponse, SyncError>,
}

/// Reconciles the store against the pull and push paths and translates
/// user intents into outbound wire events.
pub struct SyncEngine {
    directory: ChannelDirectory,
    store: ChannelStore,
    presence: PresenceSet,
    view: Box<dyn ChannelView>,
    source: Arc<dyn HistorySource>,
    outbound_tx: mpsc::Sender<ClientEvent>,
    fetch_tx: mpsc::Sender<FetchOutcome>,
}

impl SyncEngine {
    pub fn new(
        directory: ChannelDirectory,
        view: Box<dyn ChannelView>,
        source: Arc<dyn HistorySource>,
        outbound_tx: mpsc::Sender<ClientEvent>,
        fetch_tx: mpsc::Sender<FetchOutcome>,
    ) -> Self {
        Self {
            directory,
            store: ChannelStore::new(ChannelId::lobby()),
            presence: PresenceSet::new(),
            view,
            source,
            outbound_tx,
            fetch_tx,
        }
    }

    /// Startup sequence: draw the static lists, announce ourselves to every
    /// configured group, and activate the lobby (which issues its one
    /// backlog fetch).
    pub async fn start(&mut self) {
        self.view.render_group_list(self.directory.list_groups());
        self.view
            .render_friend_list(&self.directory.friends(), &self.presence);

        let groups: Vec<ChannelId> = self
            .directory
            .list_groups()
            .iter()
            .map(|g| g.id.clone())
            .collect();
        for group in groups {
            self.send_event(ClientEvent::JoinGroup { group }).await;
        }

        self.switch_channel(&ChannelId::lobby());
    }

    /// User intent: make `channel` the active channel.
    ///
    /// The channel does not have to be listed in the directory; switching
    /// into a not-yet-announced direct channel is legitimate.
    pub fn switch_channel(&mut self, channel: &ChannelId) {
        self.store.set_active(channel);
        self.view.set_unread_badge(channel, false);
        self.view.render_active_channel(self.store.history(channel));
        self.ensure_history(channel);
        self.refresh_presence_summary();
    }

    /// Pull path: issue the channel's one backlog fetch if it has not
    /// happened yet.  The claim is taken synchronously, so concurrent calls
    /// for the same channel cannot double-fetch.
    pub fn ensure_history(&mut self, channel: &ChannelId) {
        if !self.store.begin_hydration(channel) {
            return;
        }

        debug!(channel = %channel, "Requesting channel backlog");
        let source = Arc::clone(&self.source);
        let fetch_tx = self.fetch_tx.clone();
        let channel = channel.clone();
        tokio::spawn(async move {
            let result = source.fetch(&channel).await;
            let _ = fetch_tx.send(FetchOutcome { channel, result }).await;
        });
    }

    /// Resolve a completed backlog fetch.
    ///
    /// The backlog is applied to the channel the fetch was issued for, not
    /// to whichever channel happens to be active by now.  There is no
    /// dedup against messages the push path delivered in the meantime.
    pub fn on_history(&mut self, outcome: FetchOutcome) {
        match outcome.result {
            Ok(payload) => {
                debug!(
                    channel = %outcome.channel,
                    count = payload.messages.len(),
                    "Channel backlog loaded"
                );
                for message in payload.messages {
                    self.apply_message(message);
                }
                self.store.finish_hydration(&outcome.channel, true);
            }
            Err(e) => {
                warn!(channel = %outcome.channel, error = %e, "History fetch failed");
                self.store.finish_hydration(&outcome.channel, false);
            }
        }
    }

    /// Push path: one handler per inbound event kind.
    pub fn handle_push(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Message(message) => self.apply_message(message),

            ServerEvent::System {
                channel,
                message,
                timestamp,
            } => {
                self.apply_message(Message::system(channel, message, timestamp));
            }

            ServerEvent::UserStatus { username, status } => {
                let online = status.is_online();
                if self.presence.set_status(&username, online) {
                    if self.directory.is_friend(&username) {
                        self.view.set_online_indicator(&username, online);
                    }
                    if self.store.active().as_str() == username {
                        self.refresh_presence_summary();
                    }
                }
            }

            ServerEvent::FriendUpdate { friend } => {
                if self.directory.add_friend(&friend) {
                    self.view
                        .render_friend_list(&self.directory.friends(), &self.presence);
                }
            }

            ServerEvent::Error { message } => {
                warn!(error = %message, "Server reported an error");
                // Transient notice only; never stored in any history.
                self.view.set_presence_text(&message, true);
            }
        }
    }

    /// User intent: post `body` to the active channel.  Whitespace-only
    /// bodies are silently dropped.
    pub async fn send_message(&mut self, body: &str) {
        let body = body.trim();
        if body.is_empty() {
            return;
        }
        let event = ClientEvent::SendMessage {
            channel: self.store.active().clone(),
            message: body.to_string(),
        };
        self.send_event(event).await;
    }

    /// User intent: invite a peer.  Whitespace-only names are silently
    /// dropped.
    pub async fn invite_peer(&mut self, username: &str) {
        let username = username.trim();
        if username.is_empty() {
            return;
        }
        self.send_event(ClientEvent::PrivateInvite {
            to: username.to_string(),
        })
        .await;
    }

    /// User intent: the window regained focus; re-clear the active
    /// channel's badge.  Idempotent.
    pub fn focus_active(&mut self) {
        let active = self.store.active().clone();
        self.store.clear_unseen(&active);
        self.view.set_unread_badge(&active, false);
    }

    pub fn store(&self) -> &ChannelStore {
        &self.store
    }

    pub fn directory(&self) -> &ChannelDirectory {
        &self.directory
    }

    pub fn presence(&self) -> &PresenceSet {
        &self.presence
    }

    fn apply_message(&mut self, message: Message) {
        match self.store.append_message(message.clone()) {
            AppendEffect::Render => self.view.append_bubble(&message),
            AppendEffect::Badge => self.view.set_unread_badge(&message.channel, true),
        }
    }

    fn refresh_presence_summary(&mut self) {
        let text = self.presence_summary();
        self.view.set_presence_text(&text, false);
    }

    /// Derive the presence summary for the active channel at render time:
    /// a group shows its description, a direct channel the peer's live
    /// status, and our own channel id nothing at all.
    fn presence_summary(&self) -> String {
        let active = self.store.active();
        if let Some(group) = self.directory.lookup_group(active) {
            group.description.clone()
        } else if active.as_str() != self.directory.current_user() {
            if self.presence.is_online(active.as_str()) {
                format!("{active} is online")
            } else {
                format!("{active} is offline")
            }
        } else {
            String::new()
        }
    }

    async fn send_event(&mut self, event: ClientEvent) {
        debug!(event = event.event_name(), "Outbound event");
        if self.outbound_tx.send(event).await.is_err() {
            warn!("Transport outbound channel closed, dropping event");
        }
    }
}
