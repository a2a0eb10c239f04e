//! Celestia client error types.

/// Errors from Celestia node operations.
#[derive(Debug, thiserror::Error)]
pub enum CelestiaError {
    /// HTTP transport error.
    #[error("HTTP error calling {method}: {source}")]
    Http {
        method: String,
        source: reqwest::Error,
    },
    /// The RPC endpoint returned a non-2xx status.
    #[error("{method} returned HTTP {status}: {body}")]
    ApiError {
        method: String,
        status: u16,
        body: String,
    },
    /// The node answered with a JSON-RPC error object.
    #[error("{method} failed with RPC error {code}: {message}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize {method} response: {source}")]
    Deserialization {
        method: String,
        source: reqwest::Error,
    },
    /// The response envelope carried neither a result nor an error.
    #[error("{method} returned an empty response")]
    EmptyResponse { method: String },
    /// The account cannot pay for a submission.
    #[error("insufficient Celestia balance: {0}")]
    InsufficientBalance(String),
    /// No blobs at the given height and namespace.
    #[error("no blobs found at height {height} in namespace {namespace}")]
    NotFound { height: u64, namespace: String },
    /// Rejected before any call was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl CelestiaError {
    /// Whether the node rejected the call for lack of funds.
    pub fn is_insufficient_balance(&self) -> bool {
        match self {
            Self::InsufficientBalance(_) => true,
            Self::Rpc { message, .. } => message.to_lowercase().contains("insufficient"),
            _ => false,
        }
    }
}
