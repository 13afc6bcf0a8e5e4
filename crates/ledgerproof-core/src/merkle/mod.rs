//! Merkle commitment and proof engine.
//!
//! ## Responsibilities
//!
//! - Fold ordered leaf hashes into a root (`tree`)
//! - Open per-leaf membership proofs (`tree`, `proof`)
//! - Replay proofs against a trusted root (`verify`)
//!
//! ## Non-Responsibilities
//!
//! - Record canonicalization and leaf hashing (see `canonical`, `digest`)
//! - Reading or writing proof files (handled by `ledgerproof-store`)

pub mod proof;
pub mod tree;
pub mod verify;

pub use proof::{Position, Proof, ProofRecord, ProofStep, ProofStepRecord};
pub use tree::{compute_root, generate_proof, MerkleTree};
pub use verify::{reconstruct_root, verify_proof, verify_proof_hex, verify_record};
