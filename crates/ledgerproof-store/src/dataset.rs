//! Dataset files: a JSON array of records, in commitment order.

use crate::errors::{invalid_input, io_error, serialization_error, Result};
use ledgerproof_core::errors::ExError;
use ledgerproof_core::proof_store::record_id;
use ledgerproof_core::{commit_batch, BatchCommitment, Record};
use std::fs;
use std::path::Path;

/// Field used for record ids when none is configured.
pub const DEFAULT_ID_FIELD: &str = "id";

/// A named, ordered batch of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub id: String,
    pub records: Vec<Record>,
}

impl Dataset {
    /// Parse dataset JSON text.
    ///
    /// ## Errors
    ///
    /// - `ExErrorKind::Serialization` if the text is not JSON
    /// - `ExErrorKind::InvalidInput` if the top level is not an array
    pub fn from_json(id: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let id = id.into();
        let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
            serialization_error("load_dataset", format!("dataset '{}'", id), e)
        })?;
        Self::from_value(id, value)
    }

    fn from_value(id: String, value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Array(items) => Ok(Self {
                id,
                records: items.into_iter().map(Record::from).collect(),
            }),
            other => Err(invalid_input(
                "load_dataset",
                format!(
                    "dataset '{}' must be a JSON array, found {}",
                    id,
                    Record::from(other).kind_name()
                ),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifier for every record, positionally aligned with `records`.
    ///
    /// Taken from `id_field`; records without it are named `record-NNN`.
    pub fn record_ids(&self, id_field: &str) -> Vec<String> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| record_id(record, id_field, index))
            .collect()
    }

    /// Commit the records to a Merkle root.
    ///
    /// ## Errors
    ///
    /// Returns `ExErrorKind::EmptyBatch` or `ExErrorKind::UnsupportedValueKind`
    /// from the engine.
    pub fn commit(&self) -> Result<BatchCommitment> {
        commit_batch(&self.records).map_err(|e| {
            let err: ExError = e.into();
            let message = format!("dataset '{}': {}", self.id, err.message());
            err.with_message(message)
        })
    }
}

/// Load a dataset file. The dataset id is the file stem.
///
/// ## Errors
///
/// - `ExErrorKind::NotFound` if the file does not exist
/// - `ExErrorKind::Serialization` if it is not JSON
/// - `ExErrorKind::InvalidInput` if the top level is not an array
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let bytes = fs::read(path).map_err(|e| io_error("load_dataset", path, e))?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| serialization_error("load_dataset", path.display(), e))?;

    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string();
    let dataset = Dataset::from_value(id, value)?;

    tracing::debug!(
        dataset_id = %dataset.id,
        record_count = dataset.len(),
        "Loaded dataset"
    );

    Ok(dataset)
}
