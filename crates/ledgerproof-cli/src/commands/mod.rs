pub mod anchor;
pub mod commit;
pub mod root;
pub mod verify;

use ledgerproof_store::Dataset;

/// Dataset id from the flag, falling back to the file stem.
pub(crate) fn resolve_dataset_id(dataset: &Dataset, flag: Option<String>) -> String {
    flag.unwrap_or_else(|| dataset.id.clone())
}
