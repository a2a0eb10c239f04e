//! # zkl CLI entry point
//!
//! Parses command-line arguments, installs logging, loads configuration from
//! the environment, and dispatches to subcommand handlers.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zkl_celestia::CelestiaConfig;
use zkl_cli::blob::{run_blob, BlobArgs};
use zkl_cli::codec::{run_codec, CodecArgs};
use zkl_cli::hash::{run_hash, HashArgs};
use zkl_cli::proof::{
    run_proof_status, run_prove, run_status, run_verify, ProofStatusArgs, ProveArgs, VerifyArgs,
};
use zkl_prover::ProverConfig;

/// zkl: proofs and data availability for stored files.
///
/// Hashes content identifiers into the BN254 field, requests and verifies
/// proofs from a remote prover, and publishes identifiers to Celestia.
#[derive(Parser, Debug)]
#[command(name = "zkl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Ignored when `RUST_LOG` is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the field value of a content identifier.
    Hash(HashArgs),

    /// Encode or decode text as hex or base64.
    Codec(CodecArgs),

    /// Request a proof for a content identifier.
    Prove(ProveArgs),

    /// Verify a saved proof result.
    Verify(VerifyArgs),

    /// Check a proof job submitted with `prove --no-wait`.
    ProofStatus(ProofStatusArgs),

    /// Show prover network status.
    Status,

    /// Celestia blob operations (submit, get, verify).
    Blob(BlobArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    tracing::debug!("zkl CLI starting");

    let result = match cli.command {
        Commands::Hash(args) => run_hash(&args),
        Commands::Codec(args) => run_codec(&args),
        Commands::Prove(args) => match prover_config() {
            Ok(config) => run_prove(&args, &config).await,
            Err(e) => Err(e),
        },
        Commands::Verify(args) => match prover_config() {
            Ok(config) => run_verify(&args, &config).await,
            Err(e) => Err(e),
        },
        Commands::ProofStatus(args) => match prover_config() {
            Ok(config) => run_proof_status(&args, &config).await,
            Err(e) => Err(e),
        },
        Commands::Status => match prover_config() {
            Ok(config) => run_status(&config).await,
            Err(e) => Err(e),
        },
        Commands::Blob(args) => match CelestiaConfig::from_env().context("Celestia configuration") {
            Ok(config) => run_blob(&args, &config).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn prover_config() -> anyhow::Result<ProverConfig> {
    ProverConfig::from_env().context("prover configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_hash() {
        let cli = Cli::try_parse_from(["zkl", "hash", "QmTestCID123"]).unwrap();
        if let Commands::Hash(args) = cli.command {
            assert_eq!(args.cid.as_str(), "QmTestCID123");
        } else {
            panic!("expected hash command");
        }
    }

    #[test]
    fn cli_rejects_blank_cid() {
        assert!(Cli::try_parse_from(["zkl", "hash", ""]).is_err());
        assert!(Cli::try_parse_from(["zkl", "hash", "Qm bad"]).is_err());
    }

    #[test]
    fn cli_parse_codec_decode_hex() {
        let cli =
            Cli::try_parse_from(["zkl", "codec", "decode", "--format", "hex", "7a6b6c"]).unwrap();
        let Commands::Codec(args) = cli.command else {
            panic!("expected codec command");
        };
        assert_eq!(zkl_cli::codec::transform(&args.command).unwrap(), "zkl");
    }

    #[test]
    fn cli_parse_prove_strict() {
        let cli = Cli::try_parse_from([
            "zkl", "prove", "--cid", "QmA", "--secret", "s", "--strict",
        ])
        .unwrap();
        if let Commands::Prove(args) = cli.command {
            assert!(args.strict);
            assert_eq!(args.secret, "s");
        } else {
            panic!("expected prove command");
        }
    }

    #[test]
    fn cli_parse_prove_no_wait() {
        let cli = Cli::try_parse_from([
            "zkl", "prove", "--cid", "QmA", "--secret", "s", "--no-wait",
        ])
        .unwrap();
        let Commands::Prove(args) = cli.command else {
            panic!("expected prove command");
        };
        assert!(args.no_wait);
        assert!(!args.strict);
    }

    #[test]
    fn cli_no_wait_conflicts_with_strict() {
        let result = Cli::try_parse_from([
            "zkl", "prove", "--cid", "QmA", "--secret", "s", "--no-wait", "--strict",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_proof_status() {
        let cli = Cli::try_parse_from(["zkl", "proof-status", "req-1"]).unwrap();
        let Commands::ProofStatus(args) = cli.command else {
            panic!("expected proof-status command");
        };
        assert_eq!(args.request_id.as_str(), "req-1");
        assert!(Cli::try_parse_from(["zkl", "proof-status", " "]).is_err());
    }

    #[test]
    fn cli_parse_verify() {
        let cli =
            Cli::try_parse_from(["zkl", "verify", "--cid", "QmA", "--proof", "proof.json"]).unwrap();
        if let Commands::Verify(args) = cli.command {
            assert_eq!(args.proof, PathBuf::from("proof.json"));
        } else {
            panic!("expected verify command");
        }
    }

    #[test]
    fn cli_parse_blob_verify_with_namespace() {
        let cli = Cli::try_parse_from([
            "zkl",
            "blob",
            "verify",
            "--height",
            "12345",
            "--cid",
            "QmA",
            "--namespace",
            "zkl-ipfs",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Blob(_)));
    }

    #[test]
    fn cli_namespace_flags_conflict() {
        let result = Cli::try_parse_from([
            "zkl",
            "blob",
            "get",
            "--height",
            "1",
            "--namespace",
            "a",
            "--unique-namespace",
            "b",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_verbose_is_global() {
        let cli = Cli::try_parse_from(["zkl", "status", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Status));
    }
}
