//! Proof record store: record identifier to persisted proof.
//!
//! Produced once at commit time so a single record can later be checked
//! against an anchored root without the rest of the batch.

use crate::errors::{LedgerProofError, Result};
use crate::merkle::{MerkleTree, ProofRecord};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Ordered mapping `record id -> ProofRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofStore {
    records: BTreeMap<String, ProofRecord>,
}

impl ProofStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, record_id: &str) -> Option<&ProofRecord> {
        self.records.get(record_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProofRecord)> {
        self.records.iter()
    }

    /// Insert a proof under a fresh id.
    ///
    /// ## Errors
    ///
    /// Returns `LedgerProofError::InvalidInput` if the id is already present.
    pub fn insert(&mut self, record_id: String, record: ProofRecord) -> Result<()> {
        match self.records.entry(record_id) {
            Entry::Occupied(e) => Err(LedgerProofError::InvalidInput {
                reason: format!("duplicate record id '{}'", e.key()),
            }),
            Entry::Vacant(e) => {
                e.insert(record);
                Ok(())
            }
        }
    }
}

/// Build the proof store for every leaf of `tree`.
///
/// `record_ids[i]` names the record whose leaf is at position `i`.
///
/// ## Errors
///
/// Returns `LedgerProofError::InvalidInput` if the id count differs from
/// the leaf count or an id repeats.
pub fn build_proof_store<S: AsRef<str>>(record_ids: &[S], tree: &MerkleTree) -> Result<ProofStore> {
    if record_ids.len() != tree.leaf_count() {
        return Err(LedgerProofError::InvalidInput {
            reason: format!(
                "{} record ids for {} leaves",
                record_ids.len(),
                tree.leaf_count()
            ),
        });
    }

    let mut store = ProofStore::new();
    for (index, (id, leaf)) in record_ids.iter().zip(tree.leaves()).enumerate() {
        let proof = tree.proof(index)?;
        store.insert(id.as_ref().to_string(), ProofRecord::new(leaf, &proof))?;
    }
    Ok(store)
}

/// Derive a record's identifier from `id_field`.
///
/// String values are used as-is, numbers by their canonical text. Records
/// without a usable field get `record-NNN` from their 1-based position.
pub fn record_id(record: &Record, id_field: &str, index: usize) -> String {
    match record.get(id_field) {
        Some(Record::String(s)) => s.clone(),
        Some(value @ Record::Number(_)) => crate::canonical::canonical_string(value)
            .unwrap_or_else(|_| positional_id(index)),
        _ => positional_id(index),
    }
}

fn positional_id(index: usize) -> String {
    format!("record-{:03}", index + 1)
}
