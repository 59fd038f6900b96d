use thiserror::Error;

/// Errors produced by the sync layer.
///
/// None of these are fatal to the session: fetch failures leave the channel
/// eligible for a retry and everything else is logged and dropped.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The history fetch failed or returned a malformed payload.
    #[error("History fetch failed: {0}")]
    Fetch(String),

    /// Protocol-level failure from the shared layer.
    #[error(transparent)]
    Protocol(#[from] parley_shared::ParleyError),
}
