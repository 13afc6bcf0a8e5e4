//! Trusted-root manifest
//!
//! Maps dataset ids to the root committed for them. Verifiers read the
//! root from here instead of recomputing it from the full batch.

use crate::atomic::atomic_write;
use crate::errors::{io_error, not_found, serialization_error, Result};
use ledgerproof_core::errors::ExError;
use ledgerproof_core::{BatchCommitment, Hash256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Committed root for one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub merkle_root: String,
    pub record_count: usize,
}

impl ManifestEntry {
    pub fn from_commitment(commitment: &BatchCommitment) -> Self {
        Self {
            merkle_root: commitment.root().to_hex(),
            record_count: commitment.record_count(),
        }
    }
}

/// `{ "datasets": { "<datasetId>": { "merkleRoot", "recordCount" } } }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub datasets: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    /// Read a manifest file.
    ///
    /// ## Errors
    ///
    /// - `ExErrorKind::NotFound` if the file does not exist
    /// - `ExErrorKind::Serialization` if it is not a manifest
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| io_error("load_manifest", path, e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| serialization_error("load_manifest", path.display(), e))
    }

    /// Like `load`, but a missing file yields an empty manifest.
    ///
    /// ## Errors
    ///
    /// Same as `load` except for the missing-file case.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the manifest atomically as pretty JSON.
    ///
    /// ## Errors
    ///
    /// Returns `ExErrorKind::Io` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| serialization_error("save_manifest", path.display(), e))?;
        atomic_write(path, &json)?;

        tracing::debug!(
            path = %path.display(),
            dataset_count = self.datasets.len(),
            "Saved manifest"
        );

        Ok(())
    }

    /// Insert or replace a dataset's entry, returning the previous one.
    pub fn upsert(
        &mut self,
        dataset_id: impl Into<String>,
        entry: ManifestEntry,
    ) -> Option<ManifestEntry> {
        self.datasets.insert(dataset_id.into(), entry)
    }

    pub fn get(&self, dataset_id: &str) -> Option<&ManifestEntry> {
        self.datasets.get(dataset_id)
    }

    /// The trusted root for a dataset.
    ///
    /// ## Errors
    ///
    /// - `ExErrorKind::NotFound` if the dataset has no entry
    /// - `ExErrorKind::InvalidInput` if the stored root is not a valid digest
    pub fn trusted_root(&self, dataset_id: &str) -> Result<Hash256> {
        let entry = self
            .get(dataset_id)
            .ok_or_else(|| not_found("trusted_root", "dataset", dataset_id))?;
        Hash256::from_hex(&entry.merkle_root).map_err(ExError::from)
    }
}
