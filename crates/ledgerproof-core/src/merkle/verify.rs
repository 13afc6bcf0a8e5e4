//! Merkle proof verification.
//!
//! Replays a proof from a leaf hash and compares the reconstructed root
//! against a trusted root byte for byte. A proof that does not reconstruct
//! the root is an ordinary `false`; only structurally invalid input is an
//! error.

use crate::digest::{hash_pair, Hash256};
use crate::errors::{LedgerProofError, Result};
use crate::merkle::proof::{Position, Proof, ProofRecord, ProofStepRecord};

/// Recompute the root implied by `leaf` and `proof`.
pub fn reconstruct_root(leaf: &Hash256, proof: &Proof) -> Hash256 {
    proof
        .steps()
        .iter()
        .fold(*leaf, |current, step| match step.position {
            Position::Left => hash_pair(&step.hash, &current),
            Position::Right => hash_pair(&current, &step.hash),
        })
}

/// Check that `proof` links `leaf` to `trusted_root`.
pub fn verify_proof(leaf: &Hash256, trusted_root: &Hash256, proof: &Proof) -> bool {
    reconstruct_root(leaf, proof) == *trusted_root
}

/// Verify a proof given in wire form.
///
/// ## Errors
///
/// Returns `LedgerProofError::MalformedProof` if the leaf hash, the root,
/// or any step is structurally invalid. A well-formed proof for a different
/// batch yields `Ok(false)`.
pub fn verify_proof_hex(
    leaf_hex: &str,
    trusted_root_hex: &str,
    steps: &[ProofStepRecord],
) -> Result<bool> {
    let leaf = parse_digest("leaf hash", leaf_hex)?;
    let root = parse_digest("trusted root", trusted_root_hex)?;
    let proof = Proof::from_records(steps)?;

    let verified = verify_proof(&leaf, &root, &proof);
    tracing::debug!(
        leaf_hash = %leaf,
        proof_len = proof.len(),
        verified,
        "proof replayed"
    );
    Ok(verified)
}

/// Verify a persisted proof record against a trusted root.
///
/// ## Errors
///
/// See [`verify_proof_hex`].
pub fn verify_record(record: &ProofRecord, trusted_root_hex: &str) -> Result<bool> {
    verify_proof_hex(&record.leaf_hash_hex, trusted_root_hex, &record.proof)
}

fn parse_digest(what: &str, value: &str) -> Result<Hash256> {
    Hash256::from_hex(value).map_err(|e| LedgerProofError::MalformedProof {
        step: None,
        reason: format!("{}: {}", what, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::leaf_hash;
    use crate::merkle::tree::MerkleTree;

    #[test]
    fn test_empty_proof_verifies_single_leaf() {
        let h = leaf_hash(b"only");
        assert!(verify_proof(&h, &h, &Proof::default()));
    }

    #[test]
    fn test_hex_entry_point_accepts_valid_proof() {
        let leaves: Vec<_> = (0..4u8).map(|i| leaf_hash(&[i])).collect();
        let tree = MerkleTree::build(&leaves).unwrap();
        let record = ProofRecord::new(&leaves[2], &tree.proof(2).unwrap());
        assert!(verify_record(&record, &tree.root().to_hex()).unwrap());
    }

    #[test]
    fn test_wrong_root_is_false_not_error() {
        let leaves: Vec<_> = (0..4u8).map(|i| leaf_hash(&[i])).collect();
        let tree = MerkleTree::build(&leaves).unwrap();
        let record = ProofRecord::new(&leaves[2], &tree.proof(2).unwrap());
        let other_root = leaf_hash(b"elsewhere").to_hex();
        assert!(!verify_record(&record, &other_root).unwrap());
    }

    #[test]
    fn test_bad_leaf_hex_is_malformed() {
        let root = leaf_hash(b"r").to_hex();
        let err = verify_proof_hex("zz", &root, &[]).unwrap_err();
        assert!(matches!(err, LedgerProofError::MalformedProof { step: None, .. }));
    }

    #[test]
    fn test_uppercase_root_is_malformed() {
        let leaf = leaf_hash(b"l").to_hex();
        let root = leaf_hash(b"l").to_hex().to_uppercase();
        assert!(matches!(
            verify_proof_hex(&leaf, &root, &[]),
            Err(LedgerProofError::MalformedProof { .. })
        ));
    }
}
