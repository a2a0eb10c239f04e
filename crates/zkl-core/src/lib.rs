//! # zkl-core — Foundational Types for zkl
//!
//! Leaf crate of the workspace. Defines the primitives shared by the prover
//! coordinator, the Celestia client, and the CLI. It depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `ContentId` (an IPFS CID) and
//!    `RequestId` (a prover-assigned handle) are distinct types with validated
//!    constructors. You cannot poll with a CID or prove a request id.
//!
//! 2. **One field-hash function.** [`field_hash()`] is the only way to turn an
//!    identifier into a circuit input. Proof generation and verification both
//!    call it, so the two paths cannot drift apart.
//!
//! 3. **Codecs are library calls.** Hex and base64 go through the `hex` and
//!    `base64` crates behind [`codec`]; there is no hand-rolled bit shifting.
//!
//! 4. **UTC-only timestamps.** [`Timestamp`] is UTC with seconds precision.
//!
//! 5. **One way to read the environment.** Client configurations load through
//!    the readers in [`config`], so every crate reports bad settings alike.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `zkl-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod codec;
pub mod config;
pub mod error;
pub mod field;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use codec::{BlobPayload, TextEncoding};
pub use config::ConfigError;
pub use error::{CodecError, CoreError};
pub use field::{field_hash, FieldElement, FIELD_MODULUS};
pub use identity::{ContentId, RequestId};
pub use temporal::Timestamp;
