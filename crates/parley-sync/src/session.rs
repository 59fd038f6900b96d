//! Session event loop with the tokio mpsc command/notification pattern.
//!
//! One task owns the [`SyncEngine`] and processes UI intents, push events,
//! and completed backlog fetches strictly one at a time.  Each individual
//! stream is consumed in arrival order; no ordering is promised between a
//! pending fetch result and push events for the same channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use parley_shared::constants::EVENT_CHANNEL_CAPACITY;
use parley_shared::protocol::{ClientEvent, ServerEvent};
use parley_shared::types::ChannelId;
use parley_store::ChannelDirectory;

use crate::engine::{FetchOutcome, SyncEngine};
use crate::fetch::HistorySource;
use crate::view::ChannelView;

/// User intents sent *into* the session task.
#[derive(Debug)]
pub enum UiIntent {
    /// Display a different channel.
    SwitchChannel(ChannelId),
    /// Post a message to the active channel.
    SendMessage(String),
    /// Invite a peer into a direct-message relationship.
    InvitePeer(String),
    /// The window regained focus; re-clear the active channel's badge.
    FocusActive,
    /// Tear the session down.
    Shutdown,
}

/// Spawn the session event loop in a background tokio task.
///
/// `outbound_tx` carries wire events to the transport and `push_rx` feeds
/// the server's event stream in.  Returns the intent sender for the UI and
/// the task handle.
pub fn spawn_session(
    directory: ChannelDirectory,
    view: Box<dyn ChannelView>,
    source: Arc<dyn HistorySource>,
    outbound_tx: mpsc::Sender<ClientEvent>,
    mut push_rx: mpsc::Receiver<ServerEvent>,
) -> (mpsc::Sender<UiIntent>, JoinHandle<()>) {
    let (intent_tx, mut intent_rx) = mpsc::channel::<UiIntent>(EVENT_CHANNEL_CAPACITY);
    let (fetch_tx, mut fetch_rx) = mpsc::channel::<FetchOutcome>(EVENT_CHANNEL_CAPACITY);

    let handle = tokio::spawn(async move {
        let mut engine = SyncEngine::new(directory, view, source, outbound_tx, fetch_tx);
        engine.start().await;

        loop {
            tokio::select! {
                intent = intent_rx.recv() => {
                    match intent {
                        Some(UiIntent::SwitchChannel(channel)) => {
                            engine.switch_channel(&channel);
                        }
                        Some(UiIntent::SendMessage(body)) => {
                            engine.send_message(&body).await;
                        }
                        Some(UiIntent::InvitePeer(username)) => {
                            engine.invite_peer(&username).await;
                        }
                        Some(UiIntent::FocusActive) => {
                            engine.focus_active();
                        }
                        Some(UiIntent::Shutdown) => {
                            info!("Session shutdown requested");
                            break;
                        }
                        None => {
                            // All senders dropped
                            info!("Intent channel closed, shutting down session");
                            break;
                        }
                    }
                }

                event = push_rx.recv() => {
                    match event {
                        Some(event) => engine.handle_push(event),
                        None => {
                            // Reconnection is a transport concern; a closed
                            // stream ends the session.
                            warn!("Push stream ended, shutting down session");
                            break;
                        }
                    }
                }

                Some(outcome) = fetch_rx.recv() => {
                    engine.on_history(outcome);
                }
            }
        }

        info!("Session event loop terminated");
    });

    (intent_tx, handle)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use parley_shared::protocol::HistoryResponse;
    use parley_shared::types::GroupInfo;

    use crate::error::SyncError;
    use crate::view::NullView;

    use super::*;

    struct EmptySource;

    #[async_trait]
    impl HistorySource for EmptySource {
        async fn fetch(&self, _channel: &ChannelId) -> Result<HistoryResponse, SyncError> {
            Ok(HistoryResponse::default())
        }
    }

    fn test_directory() -> ChannelDirectory {
        ChannelDirectory::new(
            "casey",
            vec![GroupInfo {
                id: ChannelId::lobby(),
                name: "Lobby".to_string(),
                description: String::new(),
            }],
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn test_session_translates_intents_to_wire_events() {
        let (outbound_tx, mut outbound_rx) = mpsc::channel(16);
        let (_push_tx, push_rx) = mpsc::channel(16);

        let (intent_tx, handle) = spawn_session(
            test_directory(),
            Box::new(NullView),
            Arc::new(EmptySource),
            outbound_tx,
            push_rx,
        );

        // Startup announces every configured group.
        assert_eq!(
            outbound_rx.recv().await.unwrap(),
            ClientEvent::JoinGroup {
                group: ChannelId::lobby()
            }
        );

        // Whitespace-only intents vanish; the real one goes out trimmed.
        intent_tx
            .send(UiIntent::SendMessage("   ".to_string()))
            .await
            .unwrap();
        intent_tx
            .send(UiIntent::SendMessage(" hello ".to_string()))
            .await
            .unwrap();
        assert_eq!(
            outbound_rx.recv().await.unwrap(),
            ClientEvent::SendMessage {
                channel: ChannelId::lobby(),
                message: "hello".to_string(),
            }
        );

        intent_tx
            .send(UiIntent::InvitePeer("blake".to_string()))
            .await
            .unwrap();
        assert_eq!(
            outbound_rx.recv().await.unwrap(),
            ClientEvent::PrivateInvite {
                to: "blake".to_string(),
            }
        );

        intent_tx.send(UiIntent::Shutdown).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_session_ends_when_push_stream_closes() {
        let (outbound_tx, mut outbound_rx) = mpsc::channel(16);
        let (push_tx, push_rx) = mpsc::channel(16);

        let (_intent_tx, handle) = spawn_session(
            test_directory(),
            Box::new(NullView),
            Arc::new(EmptySource),
            outbound_tx,
            push_rx,
        );

        // Let startup finish before closing the stream.
        let _ = outbound_rx.recv().await;
        drop(push_tx);

        handle.await.unwrap();
    }
}
