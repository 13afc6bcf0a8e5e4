//! Anchor payload handed to the ledger submission collaborator.
//!
//! The engine only builds and parses the message; submitting it and
//! retrieving it back from a mirror are outside this crate, and any topic
//! or account configuration belongs to those collaborators.

use crate::digest::Hash256;
use crate::errors::{LedgerProofError, Result};
use serde::{Deserialize, Serialize};

/// Schema tag every anchor message carries.
pub const ANCHOR_SCHEMA: &str = "hcs.merkleRootAnchor";

/// Message published to anchor a batch root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorMessage {
    pub schema: String,
    pub merkle_root: String,
    pub dataset_id: String,
    pub record_count: usize,
}

impl AnchorMessage {
    pub fn new(root: &Hash256, dataset_id: impl Into<String>, record_count: usize) -> Self {
        Self {
            schema: ANCHOR_SCHEMA.to_string(),
            merkle_root: root.to_hex(),
            dataset_id: dataset_id.into(),
            record_count,
        }
    }

    /// Parse a message retrieved from the ledger.
    ///
    /// ## Errors
    ///
    /// - `LedgerProofError::Serialization` if the bytes are not a message
    /// - `LedgerProofError::InvalidInput` if the schema tag is not
    ///   `hcs.merkleRootAnchor`
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let message: AnchorMessage = serde_json::from_slice(bytes)?;
        if message.schema != ANCHOR_SCHEMA {
            return Err(LedgerProofError::InvalidInput {
                reason: format!(
                    "anchor schema '{}' is not '{}'",
                    message.schema, ANCHOR_SCHEMA
                ),
            });
        }
        Ok(message)
    }

    /// The anchored root as a digest.
    ///
    /// ## Errors
    ///
    /// Returns `LedgerProofError::InvalidDigest` if `merkleRoot` is not 64
    /// lowercase hex characters.
    pub fn anchored_root(&self) -> Result<Hash256> {
        Hash256::from_hex(&self.merkle_root)
    }

    /// Compact JSON text, as submitted.
    ///
    /// ## Errors
    ///
    /// Returns `LedgerProofError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
