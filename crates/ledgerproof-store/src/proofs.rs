//! Proof store files
//!
//! One file per committed dataset: record id -> `{leafHashHex, proof}`.

use crate::atomic::atomic_write;
use crate::errors::{io_error, not_found, serialization_error, Result};
use ledgerproof_core::{ProofRecord, ProofStore};
use std::fs;
use std::path::Path;

/// Write a proof store atomically as pretty JSON.
///
/// ## Errors
///
/// Returns `ExErrorKind::Io` if the file cannot be written.
pub fn write_proof_store(path: &Path, store: &ProofStore) -> Result<()> {
    let json = serde_json::to_vec_pretty(store)
        .map_err(|e| serialization_error("write_proof_store", path.display(), e))?;
    atomic_write(path, &json)?;

    tracing::debug!(
        path = %path.display(),
        record_count = store.len(),
        size_bytes = json.len(),
        "Wrote proof store"
    );

    Ok(())
}

/// Read a proof store file.
///
/// ## Errors
///
/// - `ExErrorKind::NotFound` if the file does not exist
/// - `ExErrorKind::Serialization` if it is not a proof store
pub fn load_proof_store(path: &Path) -> Result<ProofStore> {
    let bytes = fs::read(path).map_err(|e| io_error("load_proof_store", path, e))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| serialization_error("load_proof_store", path.display(), e))
}

/// Find one record's proof.
///
/// ## Errors
///
/// Returns `ExErrorKind::NotFound` (with the record id attached) if the
/// store has no entry for `record_id`.
pub fn lookup<'a>(store: &'a ProofStore, record_id: &str) -> Result<&'a ProofRecord> {
    store
        .get(record_id)
        .ok_or_else(|| not_found("lookup_proof", "record", record_id).with_record_id(record_id))
}
