use thiserror::Error;

/// Errors produced by the shared protocol layer.
#[derive(Error, Debug)]
pub enum ParleyError {
    /// A frame that does not match the wire contract.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
