//! Anchor payload command
//!
//! Emits the message a ledger client would submit. Submission itself is
//! left to that client.

use super::resolve_dataset_id;
use clap::Args;
use ledgerproof_core::AnchorMessage;
use ledgerproof_store::atomic::atomic_write;
use ledgerproof_store::load_dataset;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AnchorArgs {
    /// Dataset file (JSON array of records)
    #[arg(long)]
    pub dataset: PathBuf,

    /// Dataset id (defaults to the dataset file stem)
    #[arg(long)]
    pub dataset_id: Option<String>,

    /// Write the message here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn execute(args: AnchorArgs) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&args.dataset)?;
    let dataset_id = resolve_dataset_id(&dataset, args.dataset_id);
    let commitment = dataset.commit()?;

    let message = AnchorMessage::new(&commitment.root(), dataset_id, commitment.record_count());
    let json = message.to_json()?;

    match &args.out {
        Some(path) => {
            atomic_write(path, json.as_bytes())?;
            println!("Anchor message written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
