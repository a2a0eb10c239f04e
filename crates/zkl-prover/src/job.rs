//! Detached proof jobs: submit now, check later.
//!
//! [`SubmittedJob`] is what a caller keeps after submitting without waiting;
//! [`JobStatus`] is one status query against it. Neither path polls or
//! substitutes a fallback proof.

use serde::{Deserialize, Serialize};
use zkl_core::{RequestId, Timestamp};

use crate::poll::PollState;
use crate::types::{ProofHandle, ProofPayload, ProofStatusResponse, RemoteStatus};

/// Prover explorer page for a job.
pub const EXPLORER_BASE: &str = "https://explorer.succinct.xyz/transactions";

/// A job accepted by the prover and not yet waited on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedJob {
    pub request_id: RequestId,
    pub submitted_at: Timestamp,
    pub explorer_url: String,
}

impl From<ProofHandle> for SubmittedJob {
    fn from(handle: ProofHandle) -> Self {
        let explorer_url = format!("{EXPLORER_BASE}/{}", handle.request_id);
        Self {
            request_id: handle.request_id,
            submitted_at: handle.submitted_at,
            explorer_url,
        }
    }
}

/// Snapshot of a job's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatus {
    pub request_id: RequestId,
    /// `pending`, `completed` or `failed`.
    pub state: PollState,
    /// Status string exactly as the prover reported it.
    pub reported: String,
    pub result: Option<ProofPayload>,
    pub error: Option<String>,
    pub checked_at: Timestamp,
}

impl JobStatus {
    /// Classify a status response the way the poll loop does: a completed
    /// job without a result is still pending.
    pub(crate) fn from_response(request_id: RequestId, resp: ProofStatusResponse) -> Self {
        let state = match resp.remote_status() {
            RemoteStatus::Completed if resp.result.is_some() => PollState::Completed,
            RemoteStatus::Failed => PollState::Failed,
            RemoteStatus::Completed | RemoteStatus::InProgress => PollState::Pending,
        };
        Self {
            request_id,
            state,
            reported: resp.status,
            result: resp.result,
            error: resp.error,
            checked_at: Timestamp::now(),
        }
    }

    /// Whether the job will not change again.
    pub fn is_final(&self) -> bool {
        self.state.is_terminal()
    }
}
