// Proof generation and verification: round-trip over many batch sizes,
// tamper detection, and malformed wire input.

use ledgerproof_core::digest::leaf_hash;
use ledgerproof_core::merkle::{
    compute_root, generate_proof, verify_proof, verify_proof_hex, verify_record, MerkleTree,
    Position, Proof, ProofRecord, ProofStep, ProofStepRecord,
};
use ledgerproof_core::{Hash256, LedgerProofError};
use proptest::prelude::*;

fn leaves(n: usize) -> Vec<Hash256> {
    (0..n).map(|i| leaf_hash(&(i as u64).to_le_bytes())).collect()
}

fn flip_bit(hash: &Hash256, bit: usize) -> Hash256 {
    let mut bytes = *hash.as_bytes();
    bytes[bit / 8] ^= 1 << (bit % 8);
    Hash256::from_bytes(bytes)
}

proptest! {
    #[test]
    fn every_leaf_round_trips(n in 1usize..64, pick in any::<prop::sample::Index>()) {
        let l = leaves(n);
        let root = compute_root(&l).unwrap();
        let i = pick.index(n);
        let proof = generate_proof(&l, i).unwrap();
        prop_assert!(verify_proof(&l[i], &root, &proof));
    }

    #[test]
    fn any_single_bit_flip_is_detected(
        n in 2usize..40,
        pick in any::<prop::sample::Index>(),
        bit in 0usize..256,
    ) {
        let l = leaves(n);
        let tree = MerkleTree::build(&l).unwrap();
        let i = pick.index(n);
        let proof = tree.proof(i).unwrap();
        let root = tree.root();

        prop_assert!(!verify_proof(&flip_bit(&l[i], bit), &root, &proof));
        prop_assert!(!verify_proof(&l[i], &flip_bit(&root, bit), &proof));

        for s in 0..proof.len() {
            let mut steps = proof.steps().to_vec();
            steps[s].hash = flip_bit(&steps[s].hash, bit);
            prop_assert!(!verify_proof(&l[i], &root, &Proof::new(steps)));
        }
    }
}

#[test]
fn test_exhaustive_small_batches() {
    for n in 1..=33 {
        let l = leaves(n);
        let tree = MerkleTree::build(&l).unwrap();
        for i in 0..n {
            let proof = tree.proof(i).unwrap();
            assert!(verify_proof(&l[i], &tree.root(), &proof), "n={} i={}", n, i);
            assert_eq!(proof, generate_proof(&l, i).unwrap());
        }
    }
}

#[test]
fn test_proof_for_one_leaf_fails_for_another() {
    let l = leaves(8);
    let tree = MerkleTree::build(&l).unwrap();
    let proof = tree.proof(2).unwrap();
    assert!(!verify_proof(&l[3], &tree.root(), &proof));
}

#[test]
fn test_flipped_position_fails() {
    let l = leaves(4);
    let tree = MerkleTree::build(&l).unwrap();
    let mut steps = tree.proof(0).unwrap().steps().to_vec();
    steps[0].position = Position::Left;
    assert!(!verify_proof(&l[0], &tree.root(), &Proof::new(steps)));
}

#[test]
fn test_truncated_and_extended_proofs_fail() {
    let l = leaves(8);
    let tree = MerkleTree::build(&l).unwrap();
    let steps = tree.proof(5).unwrap().steps().to_vec();

    let truncated = Proof::new(steps[..steps.len() - 1].to_vec());
    assert!(!verify_proof(&l[5], &tree.root(), &truncated));

    let mut extended = steps.clone();
    extended.push(ProofStep {
        hash: leaf_hash(b"pad"),
        position: Position::Right,
    });
    assert!(!verify_proof(&l[5], &tree.root(), &Proof::new(extended)));
}

#[test]
fn test_index_out_of_range() {
    let l = leaves(3);
    assert_eq!(
        generate_proof(&l, 5).unwrap_err(),
        LedgerProofError::IndexOutOfRange { index: 5, len: 3 }
    );
}

#[test]
fn test_wire_round_trip_through_json() {
    let l = leaves(11);
    let tree = MerkleTree::build(&l).unwrap();
    let record = ProofRecord::new(&l[9], &tree.proof(9).unwrap());

    let json = serde_json::to_string(&record).unwrap();
    let back: ProofRecord = serde_json::from_str(&json).unwrap();
    assert!(verify_record(&back, &tree.root().to_hex()).unwrap());
}

#[test]
fn test_malformed_wire_steps() {
    let l = leaves(4);
    let tree = MerkleTree::build(&l).unwrap();
    let root = tree.root().to_hex();
    let good = tree.proof(1).unwrap().to_records();

    let mut bad_flag = good.clone();
    bad_flag[0].position = "right".to_string();
    assert!(matches!(
        verify_proof_hex(&l[1].to_hex(), &root, &bad_flag),
        Err(LedgerProofError::MalformedProof { step: Some(0), .. })
    ));

    let mut short_hash = good.clone();
    short_hash[1].hash = short_hash[1].hash[..62].to_string();
    assert!(matches!(
        verify_proof_hex(&l[1].to_hex(), &root, &short_hash),
        Err(LedgerProofError::MalformedProof { step: Some(1), .. })
    ));

    let non_hex = vec![ProofStepRecord {
        hash: "g".repeat(64),
        position: "LEFT".to_string(),
    }];
    assert!(matches!(
        verify_proof_hex(&l[1].to_hex(), &root, &non_hex),
        Err(LedgerProofError::MalformedProof { .. })
    ));
}

#[test]
fn test_wellformed_mismatch_is_false() {
    let l = leaves(4);
    let tree = MerkleTree::build(&l).unwrap();
    let records = tree.proof(1).unwrap().to_records();
    let other_leaf = leaf_hash(b"not-in-batch").to_hex();
    assert!(!verify_proof_hex(&other_leaf, &tree.root().to_hex(), &records).unwrap());
}
