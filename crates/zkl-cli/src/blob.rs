//! # Blob Subcommand
//!
//! Publishes content identifiers to Celestia and reads them back. Node
//! settings come from the `ZKL_CELESTIA_*` environment variables.
//!
//! ```bash
//! zkl blob submit --cid QmTestCID123
//! zkl blob get --height 12345
//! zkl blob verify --height 12345 --cid QmTestCID123
//! zkl blob submit --cid QmTestCID123 --unique-namespace alice
//! ```

use anyhow::{ensure, Context, Result};
use clap::{Args, Subcommand};
use zkl_celestia::{CelestiaClient, CelestiaConfig, Namespace};
use zkl_core::ContentId;

use crate::{print_json, EXIT_INVALID};

/// Blob subcommand arguments.
#[derive(Args, Debug)]
pub struct BlobArgs {
    #[command(subcommand)]
    pub command: BlobCommand,
}

/// Available blob subcommands.
#[derive(Subcommand, Debug)]
pub enum BlobCommand {
    /// Publish a content identifier as a blob.
    Submit {
        #[arg(long)]
        cid: ContentId,
        #[command(flatten)]
        namespace: NamespaceArgs,
    },
    /// Fetch and decode every blob at a height.
    Get {
        #[arg(long)]
        height: u64,
        #[command(flatten)]
        namespace: NamespaceArgs,
    },
    /// Check that a height carries a content identifier.
    Verify {
        #[arg(long)]
        height: u64,
        #[arg(long)]
        cid: ContentId,
        #[command(flatten)]
        namespace: NamespaceArgs,
    },
}

/// Namespace selection shared by all blob subcommands.
#[derive(Args, Debug, Default)]
pub struct NamespaceArgs {
    /// Namespace name, or `0x`-prefixed hex. Defaults to `zkl-ipfs`.
    #[arg(long, conflicts_with = "unique_namespace")]
    pub namespace: Option<String>,

    /// Use `zkl-ipfs-{SEED}` as the namespace.
    #[arg(long, value_name = "SEED")]
    pub unique_namespace: Option<String>,
}

impl NamespaceArgs {
    /// Resolve to a wire namespace.
    pub fn resolve(&self) -> Result<Namespace> {
        let namespace = match (&self.namespace, &self.unique_namespace) {
            (Some(raw), _) => Namespace::parse(raw),
            (None, Some(seed)) => Namespace::unique(Some(seed)),
            (None, None) => Ok(Namespace::default()),
        };
        namespace.context("invalid namespace")
    }
}

/// Execute the blob subcommand.
pub async fn run_blob(args: &BlobArgs, config: &CelestiaConfig) -> Result<u8> {
    let client = CelestiaClient::new(config).context("failed to build Celestia client")?;

    match &args.command {
        BlobCommand::Submit { cid, namespace } => {
            let namespace = namespace.resolve()?;
            let submission = client
                .submit(cid, &namespace)
                .await
                .context("blob submission failed")?;
            print_json(&submission)?;
            Ok(0)
        }
        BlobCommand::Get { height, namespace } => {
            check_height(*height)?;
            let namespace = namespace.resolve()?;
            let set = client
                .get_all(*height, &namespace)
                .await
                .context("blob retrieval failed")?;
            print_json(&set)?;
            Ok(0)
        }
        BlobCommand::Verify {
            height,
            cid,
            namespace,
        } => {
            check_height(*height)?;
            let namespace = namespace.resolve()?;
            let verification = client.verify_content(*height, cid, &namespace).await;
            print_json(&verification)?;
            Ok(if verification.is_valid { 0 } else { EXIT_INVALID })
        }
    }
}

/// Height 0 is an input error, never a negative verification.
fn check_height(height: u64) -> Result<()> {
    ensure!(height > 0, "block height must be at least 1");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_node() -> CelestiaConfig {
        CelestiaConfig::local_mock("http://127.0.0.1:1", "tok").unwrap()
    }

    #[tokio::test]
    async fn verify_at_height_zero_is_an_error_not_invalid() {
        let args = BlobArgs {
            command: BlobCommand::Verify {
                height: 0,
                cid: ContentId::new("QmA").unwrap(),
                namespace: NamespaceArgs::default(),
            },
        };
        let err = run_blob(&args, &unreachable_node()).await.unwrap_err();
        assert!(err.to_string().contains("block height must be at least 1"));
    }

    #[tokio::test]
    async fn get_at_height_zero_is_an_error() {
        let args = BlobArgs {
            command: BlobCommand::Get {
                height: 0,
                namespace: NamespaceArgs::default(),
            },
        };
        assert!(run_blob(&args, &unreachable_node()).await.is_err());
    }

    #[tokio::test]
    async fn verify_against_unreachable_node_is_negative() {
        let args = BlobArgs {
            command: BlobCommand::Verify {
                height: 5,
                cid: ContentId::new("QmA").unwrap(),
                namespace: NamespaceArgs::default(),
            },
        };
        assert_eq!(run_blob(&args, &unreachable_node()).await.unwrap(), EXIT_INVALID);
    }

    #[test]
    fn namespace_defaults_to_zkl_ipfs() {
        let ns = NamespaceArgs::default().resolve().unwrap();
        assert_eq!(ns, Namespace::default());
    }

    #[test]
    fn unique_namespace_uses_seed() {
        let args = NamespaceArgs {
            namespace: None,
            unique_namespace: Some("alice".into()),
        };
        assert_eq!(
            args.resolve().unwrap().name().as_deref(),
            Some("zkl-ipfs-alice")
        );
    }

    #[test]
    fn explicit_hex_namespace_is_validated() {
        let args = NamespaceArgs {
            namespace: Some("0xnothex".into()),
            unique_namespace: None,
        };
        assert!(args.resolve().is_err());
    }
}
