//! LedgerProof Store - File formats around the commitment engine
//!
//! Provides:
//! - Dataset loading (JSON array of records)
//! - Trusted-root manifest keyed by dataset id
//! - Proof store files for single-record verification
//! - Atomic temp→rename writes for everything persisted

pub mod atomic;
pub mod dataset;
pub mod errors;
pub mod manifest;
pub mod proofs;

// Re-export key types
pub use dataset::{load_dataset, Dataset};
pub use errors::Result;
pub use manifest::{Manifest, ManifestEntry};
pub use proofs::{load_proof_store, lookup, write_proof_store};
