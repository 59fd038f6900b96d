//! Pull-path boundary: on-demand backlog fetch, one request per call.

use async_trait::async_trait;

use parley_shared::protocol::HistoryResponse;
use parley_shared::types::ChannelId;

use crate::error::SyncError;

/// Source of a channel's historical backlog.
///
/// Implementations issue one request per call; the at-most-once-per-session
/// rule is enforced by the engine's hydration gate, not here.  There is no
/// timeout or retry at this seam either: that policy belongs to the
/// implementation behind it.
#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn fetch(&self, channel: &ChannelId) -> Result<HistoryResponse, SyncError>;
}
