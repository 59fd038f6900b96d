//! # parley-client
//!
//! The client shell: configuration bootstrap, logging setup, the HTTP
//! history fetcher, and the glue that wires a session together.  The
//! real-time transport and the UI both sit on the far side of channels and
//! traits owned by `parley-sync`; this crate only composes them.

pub mod config;
pub mod http;

pub use config::SessionConfig;
pub use http::HistoryClient;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use parley_shared::protocol::{ClientEvent, ServerEvent};
use parley_sync::{spawn_session, ChannelView, UiIntent};

/// Initialise structured logging.  `RUST_LOG` wins when set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("parley_client=debug,parley_sync=debug,parley_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Assemble and start a session from its collaborators.
///
/// `outbound_tx` and `push_rx` are the transport boundary: whatever
/// maintains the real-time connection sends inbound [`ServerEvent`]s and
/// drains outbound [`ClientEvent`]s.  `view` is the presentation adapter.
pub fn start_session(
    config: &SessionConfig,
    view: Box<dyn ChannelView>,
    outbound_tx: mpsc::Sender<ClientEvent>,
    push_rx: mpsc::Receiver<ServerEvent>,
) -> (mpsc::Sender<UiIntent>, JoinHandle<()>) {
    info!(
        user = %config.username,
        server = %config.server_url,
        groups = config.groups.len(),
        "Starting parley session"
    );

    let source = Arc::new(HistoryClient::new(config.server_url.clone()));
    spawn_session(config.directory(), view, source, outbound_tx, push_rx)
}
