//! Verification dispatch.
//!
//! Fallback proofs are checked locally by recomputing the expected field
//! value. Remote proofs go to the prover's verifier, whose verdict is
//! trusted as-is. A verifier that cannot be reached is an error, never a
//! `false`.

use zkl_core::field_hash;

use crate::client::ProverClient;
use crate::error::VerifyError;
use crate::proof::Proof;

/// Check a fallback proof's public signals against `expected_identifier`.
///
/// Empty signals never verify.
pub fn verify_fallback(public_signals: &[String], expected_identifier: &str) -> bool {
    let expected = field_hash(expected_identifier.as_bytes()).to_string();
    public_signals.first().is_some_and(|s| *s == expected)
}

/// Verify `proof` against `public_signals`.
pub async fn verify_proof(
    client: &ProverClient,
    proof: &Proof,
    public_signals: &[String],
    expected_identifier: &str,
) -> Result<bool, VerifyError> {
    match proof {
        Proof::Fallback(_) => {
            let valid = verify_fallback(public_signals, expected_identifier);
            tracing::debug!(valid, "fallback proof checked locally");
            Ok(valid)
        }
        Proof::Remote(body) => {
            let valid = client.verify(body, public_signals).await?;
            tracing::info!(valid, "remote proof verified");
            Ok(valid)
        }
    }
}
