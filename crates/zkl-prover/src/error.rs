//! Prover client error types.
//!
//! Three layers:
//!
//! - [`ProverApiError`] describes a single failed HTTP exchange.
//! - [`ProofError`] describes why a proof request did not resolve.
//! - [`VerifyError`] describes why a verification could not be decided.

use zkl_core::RequestId;

/// Errors from a single call to the prover API.
#[derive(Debug, thiserror::Error)]
pub enum ProverApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Prover returned a non-2xx status.
    #[error("prover {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Response parsed but violates the API contract.
    #[error("invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Why a proof request ended without a prover-issued proof.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    /// The generate call failed; nothing was queued.
    #[error("proof submission failed: {0}")]
    Submission(#[source] ProverApiError),
    /// The prover reported the job as failed. Not retried.
    #[error("proof generation failed for request {request_id}: {reason}")]
    Failed { request_id: RequestId, reason: String },
    /// The retry ceiling was reached with the job still unresolved.
    #[error("timed out waiting for proof {request_id} after {attempts} attempts")]
    Timeout { request_id: RequestId, attempts: u32 },
    /// The caller cancelled the request.
    #[error("proof request cancelled")]
    Cancelled,
}

impl ProofError {
    /// Whether a fallback proof may stand in for this failure.
    ///
    /// Cancellation is the caller's decision and is never papered over.
    pub fn permits_fallback(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Verification could not reach a verdict.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The verifier endpoint failed. Never treated as "invalid".
    #[error("could not verify proof: {0}")]
    Api(#[from] ProverApiError),
}
