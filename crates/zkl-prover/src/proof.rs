//! Proof results as handed back to callers.

use serde::{Deserialize, Serialize};
use zkl_core::{ContentId, FieldElement, RequestId, Timestamp};

use crate::error::ProofError;

/// Protocol tag carried by fallback proofs.
pub const FALLBACK_PROTOCOL: &str = "succinct-sp1";

/// Curve tag carried by fallback proofs.
pub const FALLBACK_CURVE: &str = "bn128";

/// A proof body, either issued by the prover or synthesized locally.
///
/// The variant is the only source of truth for "is this a fallback": there
/// is no separate flag to drift out of sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum Proof {
    /// Opaque proof object returned by the prover.
    Remote(serde_json::Value),
    /// Locally synthesized stand-in. Carries no cryptographic weight.
    Fallback(FallbackProof),
}

impl Proof {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Groth16-shaped placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackProof {
    pub pi_a: [String; 3],
    pub pi_b: [[String; 2]; 3],
    pub pi_c: [String; 3],
    pub protocol: String,
    pub curve: String,
}

/// A resolved proof request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofResult {
    pub proof: Proof,
    pub public_signals: Vec<String>,
    pub field_value: FieldElement,
    /// Prover job id. `None` when submission never succeeded.
    pub request_id: Option<RequestId>,
    pub timestamp: Timestamp,
}

impl ProofResult {
    pub fn is_fallback(&self) -> bool {
        self.proof.is_fallback()
    }
}

/// Outcome of [`ProofCoordinator::create_proof`](crate::ProofCoordinator::create_proof).
#[derive(Debug)]
pub enum ProofOutcome {
    /// The prover issued a proof.
    Resolved(ProofResult),
    /// The prover could not deliver; `result` holds a fallback proof and
    /// `cause` says why.
    Fallback { result: ProofResult, cause: ProofError },
}

impl ProofOutcome {
    pub fn result(&self) -> &ProofResult {
        match self {
            Self::Resolved(result) | Self::Fallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> ProofResult {
        match self {
            Self::Resolved(result) | Self::Fallback { result, .. } => result,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Why the fallback was taken, if it was.
    pub fn cause(&self) -> Option<&ProofError> {
        match self {
            Self::Resolved(_) => None,
            Self::Fallback { cause, .. } => Some(cause),
        }
    }
}

/// Verification record for a stored file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileVerification {
    pub content_id: ContentId,
    pub public_signals: Vec<String>,
    pub proof: Proof,
    pub field_value: FieldElement,
    pub request_id: Option<RequestId>,
    pub timestamp: Timestamp,
    pub is_fallback: bool,
}

impl FileVerification {
    pub(crate) fn new(content_id: ContentId, result: ProofResult) -> Self {
        let is_fallback = result.is_fallback();
        Self {
            content_id,
            public_signals: result.public_signals,
            proof: result.proof,
            field_value: result.field_value,
            request_id: result.request_id,
            timestamp: result.timestamp,
            is_fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proof_serializes_with_kind_tag() {
        let proof = Proof::Remote(serde_json::json!({"pi_a": ["1"]}));
        let json = serde_json::to_value(&proof).unwrap();
        assert_eq!(json["kind"], "remote");
        assert_eq!(json["body"]["pi_a"][0], "1");

        let back: Proof = serde_json::from_value(json).unwrap();
        assert_eq!(back, proof);
        assert!(!back.is_fallback());
    }

    #[test]
    fn result_json_keeps_field_value_decimal() {
        let result = ProofResult {
            proof: Proof::Remote(serde_json::Value::Null),
            public_signals: vec!["42".into()],
            field_value: zkl_core::field_hash("A"),
            request_id: Some(RequestId::new("req-1").unwrap()),
            timestamp: Timestamp::now(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["field_value"], "65");
        assert_eq!(json["request_id"], "req-1");
    }

    #[test]
    fn outcome_accessors() {
        let result = ProofResult {
            proof: Proof::Remote(serde_json::Value::Null),
            public_signals: vec![],
            field_value: FieldElement::default(),
            request_id: None,
            timestamp: Timestamp::now(),
        };
        let outcome = ProofOutcome::Fallback {
            result: result.clone(),
            cause: ProofError::Timeout {
                request_id: RequestId::new("req-9").unwrap(),
                attempts: 30,
            },
        };
        assert!(outcome.is_fallback());
        assert!(matches!(outcome.cause(), Some(ProofError::Timeout { .. })));
        assert_eq!(outcome.into_result(), result);
    }
}
