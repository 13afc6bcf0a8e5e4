//! Merkle tree construction.
//!
//! Level 0 is the ordered leaf sequence. Each following level pairs
//! adjacent digests left to right, `parent = H(left ++ right)`. An unpaired
//! last digest is promoted unchanged. A single leaf is its own root.

use crate::digest::{hash_pair, Hash256};
use crate::errors::{LedgerProofError, Result};
use crate::merkle::proof::{Position, Proof, ProofStep};

/// Fold one level into the next.
///
/// This is the only place the odd-node policy is defined; root computation
/// and proof generation both go through it.
pub(crate) fn next_level(level: &[Hash256]) -> Vec<Hash256> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => hash_pair(left, right),
            // promoted unchanged
            _ => pair[0],
        })
        .collect()
}

/// Compute the root of an ordered leaf sequence.
///
/// ## Errors
///
/// Returns `LedgerProofError::EmptyBatch` if `leaves` is empty.
///
/// ## Example
///
/// ```
/// use ledgerproof_core::digest::{hash_pair, leaf_hash};
/// use ledgerproof_core::merkle::compute_root;
///
/// let h: Vec<_> = [b"a", b"b", b"c"].iter().map(|b| leaf_hash(*b)).collect();
/// let root = compute_root(&h).unwrap();
/// assert_eq!(root, hash_pair(&hash_pair(&h[0], &h[1]), &h[2]));
/// ```
pub fn compute_root(leaves: &[Hash256]) -> Result<Hash256> {
    if leaves.is_empty() {
        return Err(LedgerProofError::EmptyBatch);
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level);
    }
    Ok(level[0])
}

/// A fully materialized tree that keeps every level.
///
/// Building once and opening many proofs costs O(n) hashing plus
/// O(log n) per proof, instead of rebuilding the tree for each leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Hash256>>,
    root: Hash256,
}

impl MerkleTree {
    /// Build the tree over an ordered leaf sequence.
    ///
    /// ## Errors
    ///
    /// Returns `LedgerProofError::EmptyBatch` if `leaves` is empty.
    pub fn build(leaves: &[Hash256]) -> Result<Self> {
        let first = leaves.first().copied().ok_or(LedgerProofError::EmptyBatch)?;

        let mut levels = vec![leaves.to_vec()];
        let mut root = first;
        while let Some(top) = levels.last().filter(|level| level.len() > 1) {
            let next = next_level(top);
            root = next[0];
            levels.push(next);
        }

        Ok(Self { levels, root })
    }

    pub fn root(&self) -> Hash256 {
        self.root
    }

    /// The ordered leaf sequence (level 0).
    pub fn leaves(&self) -> &[Hash256] {
        &self.levels[0]
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of hashing levels above the leaves (0 for a single leaf).
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Open a membership proof for the leaf at `index`.
    ///
    /// Walks from the leaf to the root recording each sibling and the side
    /// it sits on. Levels where the path node is promoted emit no step.
    ///
    /// ## Errors
    ///
    /// Returns `LedgerProofError::IndexOutOfRange` if `index` is not a leaf.
    pub fn proof(&self, index: usize) -> Result<Proof> {
        let len = self.leaf_count();
        if index >= len {
            return Err(LedgerProofError::IndexOutOfRange { index, len });
        }

        let mut steps = Vec::with_capacity(self.depth());
        let mut position = index;
        for level in &self.levels[..self.depth()] {
            let sibling = position ^ 1;
            if let Some(hash) = level.get(sibling) {
                let side = if position % 2 == 0 {
                    Position::Right
                } else {
                    Position::Left
                };
                steps.push(ProofStep {
                    hash: *hash,
                    position: side,
                });
            }
            position /= 2;
        }

        Ok(Proof::new(steps))
    }
}

/// Generate the membership proof for `leaves[index]`.
///
/// ## Errors
///
/// Returns `LedgerProofError::IndexOutOfRange` if `index` is not a valid
/// position (including any index into an empty batch).
pub fn generate_proof(leaves: &[Hash256], index: usize) -> Result<Proof> {
    if index >= leaves.len() {
        return Err(LedgerProofError::IndexOutOfRange {
            index,
            len: leaves.len(),
        });
    }
    MerkleTree::build(leaves)?.proof(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::leaf_hash;

    fn leaves(n: usize) -> Vec<Hash256> {
        (0..n).map(|i| leaf_hash(format!("leaf-{}", i).as_bytes())).collect()
    }

    #[test]
    fn test_next_level_promotes_odd_tail() {
        let l = leaves(3);
        let next = next_level(&l);
        assert_eq!(next, vec![hash_pair(&l[0], &l[1]), l[2]]);
    }

    #[test]
    fn test_tree_root_matches_compute_root() {
        for n in 1..=17 {
            let l = leaves(n);
            let tree = MerkleTree::build(&l).unwrap();
            assert_eq!(tree.root(), compute_root(&l).unwrap(), "n = {}", n);
        }
    }

    #[test]
    fn test_depth_is_ceil_log2() {
        assert_eq!(MerkleTree::build(&leaves(1)).unwrap().depth(), 0);
        assert_eq!(MerkleTree::build(&leaves(2)).unwrap().depth(), 1);
        assert_eq!(MerkleTree::build(&leaves(3)).unwrap().depth(), 2);
        assert_eq!(MerkleTree::build(&leaves(8)).unwrap().depth(), 3);
        assert_eq!(MerkleTree::build(&leaves(9)).unwrap().depth(), 4);
    }

    #[test]
    fn test_promoted_leaf_skips_step() {
        // leaf 4 of 5 is promoted twice, then pairs with the root of 0..4
        let l = leaves(5);
        let proof = MerkleTree::build(&l).unwrap().proof(4).unwrap();
        assert_eq!(proof.len(), 1);
        assert_eq!(proof.steps()[0].position, Position::Left);
    }

    #[test]
    fn test_single_leaf_proof_is_empty() {
        let l = leaves(1);
        let proof = generate_proof(&l, 0).unwrap();
        assert!(proof.is_empty());
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert_eq!(compute_root(&[]), Err(LedgerProofError::EmptyBatch));
        assert_eq!(MerkleTree::build(&[]), Err(LedgerProofError::EmptyBatch));
    }

    #[test]
    fn test_index_out_of_range() {
        let l = leaves(3);
        assert_eq!(
            generate_proof(&l, 3),
            Err(LedgerProofError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            generate_proof(&[], 0),
            Err(LedgerProofError::IndexOutOfRange { index: 0, len: 0 })
        );
    }
}
