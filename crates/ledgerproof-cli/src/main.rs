//! LedgerProof CLI
//!
//! Commit record batches to Merkle roots and verify records against them

use clap::{Parser, Subcommand};
use ledgerproof_core::errors::ExError;
use ledgerproof_core::logging_facility::{self, Profile};
use ledgerproof_core_types::{RequestContext, TraceId};

mod commands;

/// Environment variable carrying an upstream trace id
const TRACE_ID_ENV: &str = "LEDGERPROOF_TRACE_ID";

#[derive(Debug, Parser)]
#[command(name = "ledgerproof")]
#[command(about = "LedgerProof - Merkle commitments for record batches", long_about = None)]
struct Cli {
    /// Logging profile (development or production)
    #[arg(long, global = true, default_value = "development")]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the Merkle root of a dataset
    Root(commands::root::RootArgs),
    /// Commit a dataset: write its proof store and record the root
    Commit(commands::commit::CommitArgs),
    /// Build the anchor message for a dataset's root
    Anchor(commands::anchor::AnchorArgs),
    /// Check a dataset against an anchored message
    VerifyBatch(commands::verify::VerifyBatchArgs),
    /// Check one record against a trusted root
    VerifyRecord(commands::verify::VerifyRecordArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    let ctx = request_context();
    let span = tracing::info_span!(
        "ledgerproof",
        request_id = %ctx.request_id,
        trace_id = ctx.trace_id.as_ref().map(TraceId::as_str),
    );
    let _guard = span.enter();

    let result = match cli.command {
        Commands::Root(args) => commands::root::execute(args),
        Commands::Commit(args) => commands::commit::execute(args),
        Commands::Anchor(args) => commands::anchor::execute(args),
        Commands::VerifyBatch(args) => commands::verify::execute_batch(args),
        Commands::VerifyRecord(args) => commands::verify::execute_record(args),
    };

    if let Err(e) = result {
        match e.downcast::<ExError>() {
            Ok(ex) => eprintln!("Error: {}", with_context(*ex, ctx)),
            Err(other) => eprintln!("Error: {} (request_id: {})", other, ctx.request_id),
        }
        std::process::exit(1);
    }
}

/// Fresh request id, plus the upstream trace id when one is set
fn request_context() -> RequestContext {
    let ctx = RequestContext::new();
    match std::env::var(TRACE_ID_ENV) {
        Ok(trace_id) if !trace_id.trim().is_empty() => {
            ctx.with_trace_id(TraceId::from_string(trace_id.trim().to_string()))
        }
        _ => ctx,
    }
}

fn with_context(err: ExError, ctx: RequestContext) -> ExError {
    let err = err.with_request_id(ctx.request_id);
    match ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id),
        None => err,
    }
}
