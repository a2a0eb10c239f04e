//! Local stand-in proofs for when the prover cannot deliver.
//!
//! A fallback proof embeds the identifier's field value in `pi_a[0]` and
//! `pi_c[0]` and publishes it as the only public signal. It proves nothing;
//! its sole use is the self-consistency check in [`crate::verify`].

use zkl_core::{FieldElement, Timestamp};

use crate::proof::{FallbackProof, Proof, ProofResult, FALLBACK_CURVE, FALLBACK_PROTOCOL};
use crate::types::ProofRequest;

/// Placeholder proof body for `field_value`.
pub fn fallback_proof(field_value: &FieldElement) -> FallbackProof {
    let h = field_value.to_string();
    let one = || "1".to_string();
    FallbackProof {
        pi_a: [h.clone(), one(), one()],
        pi_b: [[one(), one()], [one(), one()], [one(), "0".to_string()]],
        pi_c: [h, one(), one()],
        protocol: FALLBACK_PROTOCOL.to_string(),
        curve: FALLBACK_CURVE.to_string(),
    }
}

/// Synthesize a fallback result for `request`. Never fails.
pub fn synthesize(request: &ProofRequest) -> ProofResult {
    let field_value = *request.field_value();
    ProofResult {
        proof: Proof::Fallback(fallback_proof(&field_value)),
        public_signals: vec![field_value.to_string()],
        field_value,
        request_id: None,
        timestamp: Timestamp::now(),
    }
}
