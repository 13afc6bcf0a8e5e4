//! Digest primitives for leaves and Merkle nodes.
//!
//! All digests are SHA-256. A leaf hash is the digest of a record's
//! canonical bytes; an internal node is the digest of its two children
//! concatenated left then right. Digests cross every external boundary as
//! 64 lowercase hex characters.

use crate::canonical::canonicalize;
use crate::errors::{LedgerProofError, Result};
use crate::record::Record;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of every digest in bytes.
pub const HASH_LEN: usize = 32;

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash256([u8; HASH_LEN]);

impl Hash256 {
    pub const fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Build from a slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; HASH_LEN] =
            bytes
                .try_into()
                .map_err(|_| LedgerProofError::InvalidDigest {
                    value: hex::encode(bytes),
                    reason: format!("expected {} bytes, got {}", HASH_LEN, bytes.len()),
                })?;
        Ok(Self(array))
    }

    /// Lowercase hex encoding (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a digest from exactly 64 lowercase hex characters.
    ///
    /// Uppercase input is rejected so that a digest has a single textual form.
    ///
    /// ## Errors
    ///
    /// Returns `LedgerProofError::InvalidDigest` on wrong length, uppercase,
    /// or non-hex characters.
    pub fn from_hex(value: &str) -> Result<Self> {
        let invalid = |reason: String| LedgerProofError::InvalidDigest {
            value: value.to_string(),
            reason,
        };

        if value.len() != HASH_LEN * 2 {
            return Err(invalid(format!(
                "expected {} hex characters, got {}",
                HASH_LEN * 2,
                value.len()
            )));
        }
        if let Some(c) = value
            .chars()
            .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(invalid(format!("'{}' is not a lowercase hex digit", c)));
        }

        let mut bytes = [0u8; HASH_LEN];
        hex::decode_to_slice(value, &mut bytes).map_err(|e| invalid(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash256::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Hash canonical bytes into a leaf digest.
pub fn leaf_hash(canonical_bytes: &[u8]) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(canonical_bytes);
    Hash256(hasher.finalize().into())
}

/// Hash two child digests into their parent: `H(left ++ right)`.
pub fn hash_pair(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(left.0);
    hasher.update(right.0);
    Hash256(hasher.finalize().into())
}

/// Canonicalize a record and hash the result.
///
/// ## Errors
///
/// Returns `LedgerProofError::UnsupportedValueKind` if the record has no
/// canonical form.
pub fn hash_record(record: &Record) -> Result<Hash256> {
    let bytes = canonicalize(record)?;
    Ok(leaf_hash(&bytes))
}
