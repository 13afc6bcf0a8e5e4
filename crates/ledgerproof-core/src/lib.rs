//! LedgerProof Core - Merkle commitment and proof engine
//!
//! Commits an ordered batch of structured records to a single SHA-256
//! Merkle root and proves any one record's membership later without the
//! rest of the batch:
//! - Deterministic record canonicalization (`canonical`)
//! - Leaf and node hashing (`digest`)
//! - Tree construction, proof generation and verification (`merkle`)
//! - Batch commitment and per-record proof stores (`batch`, `proof_store`)
//! - Anchor payload construction (`anchor`)
//!
//! Every operation here is pure and synchronous. File formats live in
//! `ledgerproof-store`; ledger submission lives outside the workspace.

pub mod anchor;
pub mod batch;
pub mod canonical;
pub mod digest;
pub mod errors;
pub mod logging_facility;
pub mod merkle;
pub mod proof_store;
pub mod record;

pub use ledgerproof_core_types as core_types;

// Re-export commonly used types
pub use anchor::{AnchorMessage, ANCHOR_SCHEMA};
pub use batch::{commit_batch, BatchCommitment};
pub use canonical::canonicalize;
pub use digest::{hash_pair, hash_record, leaf_hash, Hash256};
pub use errors::{ExError, ExErrorKind, LedgerProofError, Result};
pub use merkle::{
    compute_root, generate_proof, verify_proof, MerkleTree, Position, Proof, ProofRecord,
};
pub use proof_store::{build_proof_store, ProofStore};
pub use record::{Number, Record};
