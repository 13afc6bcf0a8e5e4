//! Batch commitment: records in, ordered leaves and Merkle root out.
//!
//! Records are canonicalized and hashed independently, so with the
//! `parallel` feature the work is spread over a rayon pool. Either way the
//! leaf sequence keeps the input order, and the first record without a
//! canonical form aborts the whole batch.

use crate::digest::{hash_record, Hash256};
use crate::errors::{LedgerProofError, Result};
use crate::merkle::{MerkleTree, Proof};
use crate::record::Record;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Committed batch: the ordered leaves plus the tree built over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCommitment {
    tree: MerkleTree,
}

impl BatchCommitment {
    /// Commit to already-hashed leaves.
    ///
    /// ## Errors
    ///
    /// Returns `LedgerProofError::EmptyBatch` if `leaves` is empty.
    pub fn from_leaves(leaves: &[Hash256]) -> Result<Self> {
        Ok(Self {
            tree: MerkleTree::build(leaves)?,
        })
    }

    pub fn root(&self) -> Hash256 {
        self.tree.root()
    }

    pub fn leaves(&self) -> &[Hash256] {
        self.tree.leaves()
    }

    pub fn record_count(&self) -> usize {
        self.tree.leaf_count()
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    /// Membership proof for the record at `index`.
    ///
    /// ## Errors
    ///
    /// Returns `LedgerProofError::IndexOutOfRange` if `index` is not a record.
    pub fn proof(&self, index: usize) -> Result<Proof> {
        self.tree.proof(index)
    }
}

/// Hash every record into its leaf, preserving order.
///
/// ## Errors
///
/// Returns `LedgerProofError::UnsupportedValueKind` whose path is rooted
/// at the batch (`$[3].field`) for a record without a canonical form.
pub fn hash_leaves(records: &[Record]) -> Result<Vec<Hash256>> {
    #[cfg(feature = "parallel")]
    let hashed: Result<Vec<Hash256>> = {
        use rayon::prelude::*;
        records
            .par_iter()
            .enumerate()
            .map(|(i, record)| hash_record(record).map_err(|e| at_record(e, i)))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let hashed: Result<Vec<Hash256>> = records
        .iter()
        .enumerate()
        .map(|(i, record)| hash_record(record).map_err(|e| at_record(e, i)))
        .collect();

    hashed
}

/// Canonicalize, hash and commit a batch of records.
///
/// ## Errors
///
/// - `LedgerProofError::UnsupportedValueKind` if any record has no
///   canonical form (no partial root is produced)
/// - `LedgerProofError::EmptyBatch` if `records` is empty
pub fn commit_batch(records: &[Record]) -> Result<BatchCommitment> {
    let start = Instant::now();
    log_op_start!("commit_batch", record_count = records.len());

    let result = hash_leaves(records).and_then(|leaves| BatchCommitment::from_leaves(&leaves));
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(commitment) => {
            log_op_end!(
                "commit_batch",
                duration_ms = duration_ms,
                record_count = commitment.record_count(),
                merkle_root = %commitment.root()
            );
        }
        Err(err) => {
            log_op_error!("commit_batch", err.clone(), duration_ms = duration_ms);
        }
    }

    result
}

fn at_record(err: LedgerProofError, index: usize) -> LedgerProofError {
    match err {
        LedgerProofError::UnsupportedValueKind { path, reason } => {
            let rest = path.strip_prefix('$').unwrap_or(&path);
            LedgerProofError::UnsupportedValueKind {
                path: format!("$[{}]{}", index, rest),
                reason,
            }
        }
        other => other,
    }
}
