//! # Field Hash Reducer
//!
//! Maps an arbitrary byte string into the BN254 scalar field, the field the
//! file-verification circuit takes its public inputs from.
//!
//! ## Reduction
//!
//! Bytes are folded big-endian, one byte at a time:
//!
//! ```text
//! acc = 0
//! for b in bytes: acc = (acc * 256 + b) mod FIELD_MODULUS
//! ```
//!
//! The modular reduction is carried out by `ark_bn254::Fr` itself, so every
//! intermediate value is already a canonical field element.
//!
//! ## Security Invariant
//!
//! The prover receives `hash_value` computed here, and fallback verification
//! recomputes it from the expected identifier. Both paths call
//! [`field_hash()`]; any other reduction would silently break verification.

use std::fmt;

use ark_bn254::Fr;
use ark_ff::{PrimeField, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Order of the BN254 scalar field, in base 10.
pub const FIELD_MODULUS: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// An element of the BN254 scalar field, always `< FIELD_MODULUS`.
///
/// Renders and serializes as a base-10 string, the form public signals take
/// on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement(Fr);

impl FieldElement {
    /// Parse a canonical base-10 representation.
    ///
    /// Leading zeros are tolerated. Values at or above the modulus are
    /// rejected rather than reduced, so a parsed element always renders back
    /// to the same number.
    pub fn from_decimal(s: &str) -> Result<Self, CoreError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::Field(format!(
                "expected a base-10 integer, got {s:?}"
            )));
        }

        let ten = Fr::from(10u64);
        let value = s
            .bytes()
            .fold(Fr::zero(), |acc, b| acc * ten + Fr::from(u64::from(b - b'0')));
        let parsed = Self(value);

        let trimmed = s.trim_start_matches('0');
        let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
        if parsed.to_string() != trimmed {
            return Err(CoreError::Field(format!(
                "{s} is not below the field modulus"
            )));
        }
        Ok(parsed)
    }

    /// Whether this is the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Access the underlying arkworks field element.
    pub fn as_fr(&self) -> &Fr {
        &self.0
    }
}

impl From<Fr> for FieldElement {
    fn from(value: Fr) -> Self {
        Self(value)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.into_bigint())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self})")
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_decimal(&s).map_err(serde::de::Error::custom)
    }
}

/// Reduce a byte string to a field element.
///
/// Deterministic and infallible; the empty input maps to zero.
pub fn field_hash(bytes: impl AsRef<[u8]>) -> FieldElement {
    let radix = Fr::from(256u64);
    let value = bytes
        .as_ref()
        .iter()
        .fold(Fr::zero(), |acc, &b| acc * radix + Fr::from(u64::from(b)));
    FieldElement(value)
}
