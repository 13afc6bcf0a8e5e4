//! Root computation command

use clap::Args;
use ledgerproof_store::load_dataset;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RootArgs {
    /// Dataset file (JSON array of records)
    #[arg(long)]
    pub dataset: PathBuf,
}

pub fn execute(args: RootArgs) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(&args.dataset)?;
    let commitment = dataset.commit()?;
    println!("{}", commitment.root());
    Ok(())
}
