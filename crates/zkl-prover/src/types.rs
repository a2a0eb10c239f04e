//! Request, handle and wire types for the prover API.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;
use zkl_core::{ContentId, FieldElement, RequestId, Timestamp};

// -- Domain types -------------------------------------------------------------

/// One proof attempt: the content id, its field value, and the owner's secret.
///
/// Fields are private; the field value is derived at construction and cannot
/// drift from the identifier.
#[derive(Clone)]
pub struct ProofRequest {
    identifier: ContentId,
    secret: Zeroizing<String>,
    field_value: FieldElement,
}

impl ProofRequest {
    /// Build a request. An empty secret is accepted.
    pub fn new(identifier: ContentId, secret: impl Into<String>) -> Self {
        let field_value = identifier.field_value();
        Self {
            identifier,
            secret: Zeroizing::new(secret.into()),
            field_value,
        }
    }

    pub fn identifier(&self) -> &ContentId {
        &self.identifier
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn field_value(&self) -> &FieldElement {
        &self.field_value
    }
}

impl std::fmt::Debug for ProofRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofRequest")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .field("field_value", &self.field_value)
            .finish()
    }
}

/// A submitted job, held while polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofHandle {
    pub request_id: RequestId,
    pub submitted_at: Timestamp,
}

// -- Wire types ---------------------------------------------------------------

/// `POST /proofs/generate` body.
#[derive(Debug, Serialize)]
pub(crate) struct GenerateProofRequest<'a> {
    pub program_id: &'a str,
    pub inputs: ProofInputs<'a>,
    pub callback_url: Option<&'a str>,
}

/// Circuit inputs. `hash_value` is the decimal field value.
#[derive(Debug, Serialize)]
pub(crate) struct ProofInputs<'a> {
    pub ipfs_hash: &'a str,
    pub hash_value: String,
    pub secret: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateProofResponse {
    pub request_id: String,
}

/// `POST /proofs/verify` body.
#[derive(Debug, Serialize)]
pub(crate) struct VerifyProofRequest<'a> {
    pub program_id: &'a str,
    pub proof: &'a serde_json::Value,
    pub public_inputs: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyProofResponse {
    #[serde(default)]
    pub valid: bool,
}

/// `GET /proofs/{request_id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProofStatusResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<ProofPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProofStatusResponse {
    /// Classify the reported status.
    pub fn remote_status(&self) -> RemoteStatus {
        match self.status.as_str() {
            "completed" => RemoteStatus::Completed,
            "failed" => RemoteStatus::Failed,
            _ => RemoteStatus::InProgress,
        }
    }
}

/// Job status as reported by the prover.
///
/// Anything other than `completed` or `failed` (`pending`, `queued`,
/// `running`, ...) counts as still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    InProgress,
    Completed,
    Failed,
}

/// A finished job's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofPayload {
    pub proof: serde_json::Value,
    #[serde(default)]
    pub public_inputs: Vec<String>,
}
