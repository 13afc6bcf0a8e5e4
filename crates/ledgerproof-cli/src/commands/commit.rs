//! Dataset commit command
//!
//! Computes the root, writes one proof per record, and records the root in
//! the trusted-root manifest when one is given.

use super::resolve_dataset_id;
use clap::Args;
use ledgerproof_core::build_proof_store;
use ledgerproof_core::{log_op_end, log_op_start};
use ledgerproof_store::dataset::DEFAULT_ID_FIELD;
use ledgerproof_store::{load_dataset, write_proof_store, Manifest, ManifestEntry};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct CommitArgs {
    /// Dataset file (JSON array of records)
    #[arg(long)]
    pub dataset: PathBuf,

    /// Output file for the proof store
    #[arg(long)]
    pub proofs: PathBuf,

    /// Trusted-root manifest to update
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Dataset id (defaults to the dataset file stem)
    #[arg(long)]
    pub dataset_id: Option<String>,

    /// Record field holding the record id
    #[arg(long, default_value = DEFAULT_ID_FIELD)]
    pub id_field: String,
}

pub fn execute(args: CommitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let dataset = load_dataset(&args.dataset)?;
    let dataset_id = resolve_dataset_id(&dataset, args.dataset_id);
    log_op_start!("cli_commit", dataset_id = %dataset_id, record_count = dataset.len());

    let commitment = dataset.commit()?;
    let store = build_proof_store(&dataset.record_ids(&args.id_field), commitment.tree())?;
    write_proof_store(&args.proofs, &store)?;

    if let Some(manifest_path) = &args.manifest {
        let mut manifest = Manifest::load_or_default(manifest_path)?;
        manifest.upsert(
            dataset_id.clone(),
            ManifestEntry::from_commitment(&commitment),
        );
        manifest.save(manifest_path)?;
    }

    log_op_end!(
        "cli_commit",
        duration_ms = start.elapsed().as_millis() as u64,
        merkle_root = %commitment.root()
    );

    println!("Dataset committed:");
    println!("  dataset_id: {}", dataset_id);
    println!("  record_count: {}", commitment.record_count());
    println!("  merkle_root: {}", commitment.root());
    println!("  proofs: {}", args.proofs.display());
    if let Some(manifest_path) = &args.manifest {
        println!("  manifest: {}", manifest_path.display());
    }

    Ok(())
}
