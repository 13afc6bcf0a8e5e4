//! Verification commands
//!
//! `verify-batch` recomputes a dataset root and compares it with an
//! anchored message. `verify-record` checks one record's proof against a
//! trusted root. Both print PASS or FAIL and fail the process on FAIL.

use clap::Args;
use ledgerproof_core::errors::{ExError, ExErrorKind};
use ledgerproof_core::merkle::verify_record;
use ledgerproof_core::{AnchorMessage, Hash256};
use ledgerproof_store::errors::{invalid_input, io_error};
use ledgerproof_store::{load_dataset, load_proof_store, lookup, Manifest};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct VerifyBatchArgs {
    /// Dataset file (JSON array of records)
    #[arg(long)]
    pub dataset: PathBuf,

    /// Anchored message retrieved from the ledger
    #[arg(long)]
    pub anchor: PathBuf,
}

#[derive(Debug, Args)]
pub struct VerifyRecordArgs {
    /// Proof store file written by `commit`
    #[arg(long)]
    pub proofs: PathBuf,

    #[arg(long)]
    pub record_id: String,

    /// Trusted root as 64 lowercase hex characters
    #[arg(long, conflicts_with = "manifest", required_unless_present = "manifest")]
    pub root: Option<String>,

    /// Trusted-root manifest to read the root from
    #[arg(long, requires = "dataset_id")]
    pub manifest: Option<PathBuf>,

    #[arg(long)]
    pub dataset_id: Option<String>,
}

pub fn execute_batch(args: VerifyBatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(&args.anchor).map_err(|e| io_error("read_anchor", &args.anchor, e))?;
    let message = AnchorMessage::parse(&bytes)?;
    let anchored = message.anchored_root()?;

    let dataset = load_dataset(&args.dataset)?;
    let commitment = dataset.commit()?;
    let computed = commitment.root();

    tracing::info!(
        dataset_id = %message.dataset_id,
        anchored_root = %anchored,
        computed_root = %computed,
        "Compared dataset root with anchored message"
    );

    if computed == anchored {
        println!(
            "PASS: dataset '{}' matches anchored root {} ({} records)",
            message.dataset_id,
            anchored,
            commitment.record_count()
        );
        Ok(())
    } else {
        println!(
            "FAIL: dataset '{}' root {} does not match anchored root {}",
            message.dataset_id, computed, anchored
        );
        Err(Box::new(
            ExError::new(ExErrorKind::RootMismatch)
                .with_op("verify_batch")
                .with_message(format!(
                    "computed {} over {} records, anchored {} over {} records",
                    computed,
                    commitment.record_count(),
                    anchored,
                    message.record_count
                )),
        ))
    }
}

pub fn execute_record(args: VerifyRecordArgs) -> Result<(), Box<dyn std::error::Error>> {
    let root = trusted_root(&args)?;
    let store = load_proof_store(&args.proofs)?;
    let proof = lookup(&store, &args.record_id)?;

    let included = verify_record(proof, &root.to_hex())
        .map_err(|e| ExError::from(e).with_record_id(args.record_id.as_str()))?;

    tracing::info!(
        record_id = %args.record_id,
        proof_len = proof.proof.len(),
        included,
        "Verified record proof"
    );

    if included {
        println!("PASS: record '{}' is included under root {}", args.record_id, root);
        Ok(())
    } else {
        println!("FAIL: record '{}' is not included under root {}", args.record_id, root);
        Err(Box::new(
            ExError::new(ExErrorKind::RootMismatch)
                .with_op("verify_record")
                .with_record_id(args.record_id.as_str())
                .with_message("proof does not reconstruct the trusted root"),
        ))
    }
}

fn trusted_root(args: &VerifyRecordArgs) -> Result<Hash256, ExError> {
    match (&args.root, &args.manifest, &args.dataset_id) {
        (Some(hex), _, _) => Hash256::from_hex(hex).map_err(ExError::from),
        (None, Some(manifest), Some(dataset_id)) => Manifest::load(manifest)?.trusted_root(dataset_id),
        _ => Err(invalid_input(
            "verify_record",
            "either --root or --manifest with --dataset-id is required",
        )),
    }
}
