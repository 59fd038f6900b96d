//! HTTP-backed history source.
//!
//! One GET per hydration: `{base}/api/messages/{channel}`, with the channel
//! id percent-encoded as a single path segment.  Timeout and retry policy
//! live in the `reqwest` client configuration, not in the sync engine.

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use parley_shared::protocol::HistoryResponse;
use parley_shared::types::ChannelId;
use parley_sync::{HistorySource, SyncError};

/// Fetches channel backlogs from the chat server's HTTP API.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl HistoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl HistorySource for HistoryClient {
    async fn fetch(&self, channel: &ChannelId) -> Result<HistoryResponse, SyncError> {
        let url = history_url(&self.base_url, channel)?;
        debug!(channel = %channel, url = %url, "Fetching channel history");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SyncError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| SyncError::Fetch(e.to_string()))?;

        response
            .json::<HistoryResponse>()
            .await
            .map_err(|e| SyncError::Fetch(e.to_string()))
    }
}

/// Build the history endpoint URL for a channel, encoding the id so that
/// separators and reserved characters cannot escape the path segment.
fn history_url(base_url: &str, channel: &ChannelId) -> Result<Url, SyncError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| SyncError::Fetch(format!("invalid server url {base_url}: {e}")))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| SyncError::Fetch(format!("server url cannot be a base: {base_url}")))?;
        segments.pop_if_empty();
        segments.extend(["api", "messages", channel.as_str()]);
    }
    Ok(url)
}
