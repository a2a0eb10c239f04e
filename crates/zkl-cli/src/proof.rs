//! # Proof Subcommands
//!
//! `prove`, `verify`, `proof-status` and `status` against the remote prover.
//! Prover settings come from the `ZKL_*` environment variables (see
//! `ProverConfig::from_env`).
//!
//! ```bash
//! zkl prove --cid QmTestCID123 --secret s3cret > proof.json
//! zkl verify --cid QmTestCID123 --proof proof.json
//! zkl prove --cid QmTestCID123 --secret s3cret --no-wait
//! zkl proof-status <REQUEST_ID>
//! zkl status
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use zkl_core::{ContentId, RequestId};
use zkl_prover::{
    CancelToken, PollState, ProofCoordinator, ProofOutcome, ProofResult, ProverConfig,
    SubmittedJob,
};

use crate::{print_json, EXIT_INVALID};

/// Arguments for the prove subcommand.
#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Content identifier to prove.
    #[arg(long)]
    pub cid: ContentId,

    /// Owner secret passed to the circuit.
    #[arg(long, env = "ZKL_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Fail instead of substituting a fallback proof.
    #[arg(long)]
    pub strict: bool,

    /// Print the request id as soon as the prover accepts the job.
    /// Follow it with `zkl proof-status`.
    #[arg(long, conflicts_with = "strict")]
    pub no_wait: bool,
}

/// Arguments for the proof-status subcommand.
#[derive(Args, Debug)]
pub struct ProofStatusArgs {
    /// Request id printed by `zkl prove --no-wait`.
    pub request_id: RequestId,
}

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Content identifier the proof should be bound to.
    #[arg(long)]
    pub cid: ContentId,

    /// Path to a proof result JSON file as written by `zkl prove`.
    #[arg(long)]
    pub proof: PathBuf,
}

/// Request a proof. Ctrl-C cancels while waiting.
pub async fn prove(
    args: &ProveArgs,
    coordinator: &ProofCoordinator,
    cancel: &CancelToken,
) -> Result<ProofResult> {
    if args.strict {
        return coordinator
            .request_proof(&args.cid, &args.secret, cancel)
            .await
            .context("proof request failed");
    }

    let outcome = coordinator
        .create_proof(&args.cid, &args.secret, cancel)
        .await
        .context("proof request failed")?;
    if let ProofOutcome::Fallback { cause, .. } = &outcome {
        tracing::warn!("returning fallback proof: {cause}");
    }
    Ok(outcome.into_result())
}

/// Submit a proof job without waiting for it.
pub async fn submit(
    args: &ProveArgs,
    coordinator: &ProofCoordinator,
    cancel: &CancelToken,
) -> Result<SubmittedJob> {
    coordinator
        .submit_proof(&args.cid, &args.secret, cancel)
        .await
        .context("proof submission failed")
}

/// Read a saved proof result.
pub fn load_proof_result(path: &Path) -> Result<ProofResult> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read proof file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse proof file: {}", path.display()))
}

/// Verify a saved proof result against `args.cid`.
pub async fn verify(args: &VerifyArgs, coordinator: &ProofCoordinator) -> Result<bool> {
    let result = load_proof_result(&args.proof)?;
    coordinator
        .verify(&result.proof, &result.public_signals, args.cid.as_str())
        .await
        .context("verification could not be completed")
}

/// Execute the prove subcommand.
pub async fn run_prove(args: &ProveArgs, config: &ProverConfig) -> Result<u8> {
    let coordinator = ProofCoordinator::new(config).context("failed to build prover client")?;

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling proof request");
            on_interrupt.cancel();
        }
    });

    let printed = if args.no_wait {
        submit(args, &coordinator, &cancel)
            .await
            .and_then(|job| print_json(&job))
    } else {
        prove(args, &coordinator, &cancel)
            .await
            .and_then(|result| print_json(&result))
    };
    watcher.abort();

    printed?;
    Ok(0)
}

/// Execute the proof-status subcommand. Exits with [`EXIT_INVALID`] when
/// the prover reports the job as failed.
pub async fn run_proof_status(args: &ProofStatusArgs, config: &ProverConfig) -> Result<u8> {
    let coordinator = ProofCoordinator::new(config).context("failed to build prover client")?;
    let status = coordinator
        .proof_status(&args.request_id)
        .await
        .context("proof status query failed")?;
    print_json(&status)?;
    Ok(if status.state == PollState::Failed { EXIT_INVALID } else { 0 })
}

/// Execute the verify subcommand. Exits with [`EXIT_INVALID`] when the
/// proof does not verify.
pub async fn run_verify(args: &VerifyArgs, config: &ProverConfig) -> Result<u8> {
    let coordinator = ProofCoordinator::new(config).context("failed to build prover client")?;
    if verify(args, &coordinator).await? {
        println!("valid");
        Ok(0)
    } else {
        println!("invalid");
        Ok(EXIT_INVALID)
    }
}

/// Execute the status subcommand.
pub async fn run_status(config: &ProverConfig) -> Result<u8> {
    let coordinator = ProofCoordinator::new(config).context("failed to build prover client")?;
    let status = coordinator.network_status().await;
    print_json(&status)?;
    Ok(if status.circuits_available { 0 } else { EXIT_INVALID })
}
