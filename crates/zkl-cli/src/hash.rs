//! # Hash Subcommand
//!
//! Prints the BN254 field value of a content identifier, the number sent to
//! the prover as `hash_value` and expected as the first public signal.

use anyhow::Result;
use clap::Args;
use zkl_core::{ContentId, FieldElement};

/// Arguments for the hash subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Content identifier (e.g. an IPFS CID).
    pub cid: ContentId,
}

/// Field value of `cid`.
pub fn field_value_of(cid: &ContentId) -> FieldElement {
    cid.field_value()
}

/// Execute the hash subcommand.
pub fn run_hash(args: &HashArgs) -> Result<u8> {
    println!("{}", field_value_of(&args.cid));
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_of_known_cid() {
        let cid = ContentId::new("QmTestCID123").unwrap();
        assert_eq!(
            field_value_of(&cid).to_string(),
            "25200457260092006035228799539"
        );
    }
}
