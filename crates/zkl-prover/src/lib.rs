//! # zkl-prover -- Asynchronous proof coordinator
//!
//! Requests zero-knowledge proofs from a remote prover network and waits for
//! them:
//!
//! 1. Reduce the content identifier to a BN254 field element.
//! 2. Submit a generation job (`POST /proofs/generate`).
//! 3. Poll `GET /proofs/{request_id}` under a [`PollPolicy`] until the job
//!    completes, fails, runs out of attempts, or is cancelled.
//! 4. On failure or timeout, optionally substitute a locally synthesized
//!    fallback proof, explicitly marked as such.
//!
//! Verification dispatches on the proof kind: fallback proofs are checked
//! locally against the expected identifier, remote proofs go to the
//! prover's verifier.
//!
//! ## Failure handling
//!
//! [`ProofCoordinator::request_proof`] is strict and returns every failure.
//! [`ProofCoordinator::create_proof`] returns [`ProofOutcome::Fallback`] for
//! submission errors, prover-reported failures and timeouts, keeping the
//! cause. Cancellation is always an error.

pub mod cancel;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod fallback;
pub mod job;
pub mod poll;
pub mod proof;
pub mod status;
pub mod types;
pub mod verify;

pub use cancel::CancelToken;
pub use client::ProverClient;
pub use config::{ConfigError, ProverConfig};
pub use coordinator::ProofCoordinator;
pub use error::{ProofError, ProverApiError, VerifyError};
pub use job::{JobStatus, SubmittedJob};
pub use poll::{Backoff, PollPolicy, PollState};
pub use proof::{FallbackProof, FileVerification, Proof, ProofOutcome, ProofResult};
pub use status::{NetworkStatus, StatusCache};
pub use types::{ProofHandle, ProofPayload, ProofRequest};
