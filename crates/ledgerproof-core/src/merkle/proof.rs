//! Merkle proof types.
//!
//! [`Proof`] is the typed form used by the engine. [`ProofRecord`] and
//! [`ProofStepRecord`] are the persisted wire form, where digests are hex
//! strings and positions are the literal flags `LEFT` / `RIGHT`. Converting
//! wire to typed is where structural validation happens.

use crate::digest::Hash256;
use crate::errors::{LedgerProofError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side on which a proof step's sibling sits relative to the path node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    /// `parent = H(sibling ++ current)`
    Left,
    /// `parent = H(current ++ sibling)`
    Right,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Left => "LEFT",
            Position::Right => "RIGHT",
        }
    }

    /// Parse an exact wire flag. No case folding.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "LEFT" => Some(Position::Left),
            "RIGHT" => Some(Position::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One level of a membership proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub hash: Hash256,
    pub position: Position,
}

/// Ordered sibling path from a leaf up to the root.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof {
    steps: Vec<ProofStep>,
}

impl Proof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Validate and convert persisted steps.
    ///
    /// ## Errors
    ///
    /// Returns `LedgerProofError::MalformedProof` naming the first step
    /// whose position flag is not exactly `LEFT`/`RIGHT` or whose hash is
    /// not 64 lowercase hex characters.
    pub fn from_records(records: &[ProofStepRecord]) -> Result<Self> {
        let steps = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let position = Position::from_flag(&record.position).ok_or_else(|| {
                    LedgerProofError::MalformedProof {
                        step: Some(i),
                        reason: format!("unknown position flag '{}'", record.position),
                    }
                })?;
                let hash = Hash256::from_hex(&record.hash).map_err(|e| {
                    LedgerProofError::MalformedProof {
                        step: Some(i),
                        reason: e.to_string(),
                    }
                })?;
                Ok(ProofStep { hash, position })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    /// Convert to the persisted wire form.
    pub fn to_records(&self) -> Vec<ProofStepRecord> {
        self.steps
            .iter()
            .map(|step| ProofStepRecord {
                hash: step.hash.to_hex(),
                position: step.position.as_str().to_string(),
            })
            .collect()
    }
}

/// Persisted proof step: `{ "hash": <hex>, "position": "LEFT" | "RIGHT" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStepRecord {
    pub hash: String,
    pub position: String,
}

/// Persisted proof for one record: its leaf hash and sibling path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    #[serde(rename = "leafHashHex")]
    pub leaf_hash_hex: String,
    pub proof: Vec<ProofStepRecord>,
}

impl ProofRecord {
    pub fn new(leaf: &Hash256, proof: &Proof) -> Self {
        Self {
            leaf_hash_hex: leaf.to_hex(),
            proof: proof.to_records(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::leaf_hash;

    fn step(hash: &str, position: &str) -> ProofStepRecord {
        ProofStepRecord {
            hash: hash.to_string(),
            position: position.to_string(),
        }
    }

    #[test]
    fn test_position_flags_are_exact() {
        assert_eq!(Position::from_flag("LEFT"), Some(Position::Left));
        assert_eq!(Position::from_flag("RIGHT"), Some(Position::Right));
        assert_eq!(Position::from_flag("left"), None);
        assert_eq!(Position::from_flag(""), None);
    }

    #[test]
    fn test_from_records_round_trip() {
        let proof = Proof::new(vec![
            ProofStep {
                hash: leaf_hash(b"a"),
                position: Position::Right,
            },
            ProofStep {
                hash: leaf_hash(b"b"),
                position: Position::Left,
            },
        ]);
        assert_eq!(Proof::from_records(&proof.to_records()).unwrap(), proof);
    }

    #[test]
    fn test_from_records_rejects_unknown_flag() {
        let hex = leaf_hash(b"a").to_hex();
        let err = Proof::from_records(&[step(&hex, "RIGHT"), step(&hex, "UP")]).unwrap_err();
        assert!(matches!(
            err,
            LedgerProofError::MalformedProof { step: Some(1), .. }
        ));
    }

    #[test]
    fn test_from_records_rejects_short_digest() {
        let err = Proof::from_records(&[step("abcd", "LEFT")]).unwrap_err();
        assert!(matches!(
            err,
            LedgerProofError::MalformedProof { step: Some(0), .. }
        ));
    }

    #[test]
    fn test_wire_json_shape() {
        let record = ProofRecord::new(
            &leaf_hash(b"leaf"),
            &Proof::new(vec![ProofStep {
                hash: leaf_hash(b"sib"),
                position: Position::Left,
            }]),
        );
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["leafHashHex"], leaf_hash(b"leaf").to_hex());
        assert_eq!(json["proof"][0]["hash"], leaf_hash(b"sib").to_hex());
        assert_eq!(json["proof"][0]["position"], "LEFT");
    }

    #[test]
    fn test_typed_proof_serializes_as_array() {
        let proof = Proof::new(vec![ProofStep {
            hash: leaf_hash(b"x"),
            position: Position::Right,
        }]);
        let json = serde_json::to_value(&proof).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["position"], "RIGHT");
    }
}
