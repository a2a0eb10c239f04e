//! The proof coordinator: submit, poll, fall back, verify.
//!
//! ```text
//! SUBMIT --ok--> POLLING --completed--> RESOLVED
//!    |              |
//!    |              +--failed / timeout--+
//!    +--error----------------------------+--> FALLBACK_RESOLVED
//! ```
//!
//! Cancellation leaves every state directly with [`ProofError::Cancelled`].
//!
//! [`ProofCoordinator::submit_proof`] and [`ProofCoordinator::proof_status`]
//! split the same flow for callers that track the job themselves.

use std::sync::Arc;

use zkl_core::{ContentId, RequestId, Timestamp};

use crate::cancel::CancelToken;
use crate::client::ProverClient;
use crate::config::ProverConfig;
use crate::error::{ProofError, ProverApiError, VerifyError};
use crate::fallback;
use crate::job::{JobStatus, SubmittedJob};
use crate::poll::{PollPolicy, Poller};
use crate::proof::{FileVerification, Proof, ProofOutcome, ProofResult};
use crate::status::{self, NetworkStatus, StatusCache};
use crate::types::{ProofHandle, ProofRequest};
use crate::verify;

/// Coordinates proof requests against one prover.
///
/// Cheap to clone; clones share the HTTP connection pool and the status
/// cache. Each call runs its own poll state machine, so concurrent requests
/// never share attempt counters or request ids.
#[derive(Debug, Clone)]
pub struct ProofCoordinator {
    client: ProverClient,
    poll: PollPolicy,
    status_cache: Arc<StatusCache>,
}

impl ProofCoordinator {
    /// Build a coordinator from configuration.
    pub fn new(config: &ProverConfig) -> Result<Self, ProverApiError> {
        let client = ProverClient::new(config)?;
        Ok(Self::with_client(client, config.poll, config.status_ttl))
    }

    /// Build a coordinator around an existing client.
    pub fn with_client(client: ProverClient, poll: PollPolicy, status_ttl: std::time::Duration) -> Self {
        Self {
            client,
            poll,
            status_cache: Arc::new(StatusCache::new(status_ttl)),
        }
    }

    pub fn client(&self) -> &ProverClient {
        &self.client
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    pub fn status_cache(&self) -> &StatusCache {
        &self.status_cache
    }

    /// Request a proof and wait for the prover. No fallback.
    pub async fn request_proof(
        &self,
        identifier: &ContentId,
        secret: &str,
        cancel: &CancelToken,
    ) -> Result<ProofResult, ProofError> {
        let request = ProofRequest::new(identifier.clone(), secret);
        self.resolve(&request, cancel).await
    }

    /// Request a proof, substituting a fallback proof if the prover cannot
    /// deliver.
    ///
    /// Only cancellation is returned as an error.
    pub async fn create_proof(
        &self,
        identifier: &ContentId,
        secret: &str,
        cancel: &CancelToken,
    ) -> Result<ProofOutcome, ProofError> {
        let request = ProofRequest::new(identifier.clone(), secret);
        match self.resolve(&request, cancel).await {
            Ok(result) => Ok(ProofOutcome::Resolved(result)),
            Err(cause) if cause.permits_fallback() => {
                tracing::warn!(
                    content_id = %identifier,
                    "prover did not deliver, using fallback proof: {cause}"
                );
                let mut result = fallback::synthesize(&request);
                result.request_id = failed_request_id(&cause);
                Ok(ProofOutcome::Fallback { result, cause })
            }
            Err(cause) => Err(cause),
        }
    }

    /// Produce a verification record for a stored file.
    ///
    /// Probes prover availability first; an unavailable prover is logged
    /// and does not stop the request.
    pub async fn create_file_verification(
        &self,
        identifier: &ContentId,
        secret: &str,
        cancel: &CancelToken,
    ) -> Result<FileVerification, ProofError> {
        let status = self.network_status().await;
        if !status.circuits_available {
            tracing::warn!(
                content_id = %identifier,
                error = status.error.as_deref().unwrap_or("unknown"),
                "prover reported unavailable, proceeding anyway"
            );
        }

        let outcome = self.create_proof(identifier, secret, cancel).await?;
        let verification = FileVerification::new(identifier.clone(), outcome.into_result());
        tracing::info!(
            content_id = %identifier,
            is_fallback = verification.is_fallback,
            "file verification created"
        );
        Ok(verification)
    }

    /// Submit a proof job and return once the prover accepts it.
    ///
    /// No polling and no fallback: without an accepted job there is no
    /// request id to check later.
    pub async fn submit_proof(
        &self,
        identifier: &ContentId,
        secret: &str,
        cancel: &CancelToken,
    ) -> Result<SubmittedJob, ProofError> {
        let request = ProofRequest::new(identifier.clone(), secret);
        let handle = self.submit(&request, cancel).await?;
        Ok(SubmittedJob::from(handle))
    }

    /// Query a submitted job once.
    pub async fn proof_status(&self, request_id: &RequestId) -> Result<JobStatus, ProverApiError> {
        let resp = self.client.status(request_id).await?;
        let status = JobStatus::from_response(request_id.clone(), resp);
        tracing::debug!(request_id = %request_id, state = %status.state, "proof status checked");
        Ok(status)
    }

    /// Verify a proof. See [`crate::verify`].
    pub async fn verify(
        &self,
        proof: &Proof,
        public_signals: &[String],
        expected_identifier: &str,
    ) -> Result<bool, VerifyError> {
        verify::verify_proof(&self.client, proof, public_signals, expected_identifier).await
    }

    /// Prover availability, served from cache while fresh.
    pub async fn network_status(&self) -> NetworkStatus {
        if let Some(cached) = self.status_cache.get() {
            return cached;
        }
        let fresh = status::probe(&self.client).await;
        self.status_cache.put(fresh.clone());
        fresh
    }

    async fn resolve(
        &self,
        request: &ProofRequest,
        cancel: &CancelToken,
    ) -> Result<ProofResult, ProofError> {
        let handle = self.submit(request, cancel).await?;

        let payload = Poller::new(&self.client, &handle, self.poll)
            .run(cancel)
            .await?;

        Ok(ProofResult {
            proof: Proof::Remote(payload.proof),
            public_signals: payload.public_inputs,
            field_value: *request.field_value(),
            request_id: Some(handle.request_id),
            timestamp: Timestamp::now(),
        })
    }

    async fn submit(
        &self,
        request: &ProofRequest,
        cancel: &CancelToken,
    ) -> Result<ProofHandle, ProofError> {
        if cancel.is_cancelled() {
            return Err(ProofError::Cancelled);
        }
        tokio::select! {
            submitted = self.client.submit(request) => submitted.map_err(ProofError::Submission),
            _ = cancel.cancelled() => Err(ProofError::Cancelled),
        }
    }
}

fn failed_request_id(cause: &ProofError) -> Option<RequestId> {
    match cause {
        ProofError::Failed { request_id, .. } | ProofError::Timeout { request_id, .. } => {
            Some(request_id.clone())
        }
        ProofError::Submission(_) | ProofError::Cancelled => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_keeps_known_request_id() {
        let timeout = ProofError::Timeout {
            request_id: RequestId::new("req-7").unwrap(),
            attempts: 30,
        };
        assert_eq!(failed_request_id(&timeout).unwrap().as_str(), "req-7");
        let failed = ProofError::Failed {
            request_id: RequestId::new("req-8").unwrap(),
            reason: "circuit error".into(),
        };
        assert_eq!(failed_request_id(&failed).unwrap().as_str(), "req-8");
        assert!(failed_request_id(&ProofError::Cancelled).is_none());
    }

    #[tokio::test]
    async fn cancelled_before_start_never_falls_back() {
        let config = ProverConfig::local_mock("http://127.0.0.1:1", "t").unwrap();
        let coordinator = ProofCoordinator::new(&config).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        let cid = ContentId::new("QmTestCID123").unwrap();
        let err = coordinator.create_proof(&cid, "s3cret", &cancel).await.unwrap_err();
        assert!(matches!(err, ProofError::Cancelled));
    }
}
