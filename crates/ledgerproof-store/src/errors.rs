//! Error handling for ledgerproof-store
//!
//! Wraps ledgerproof-core ExError with store-specific helpers

use ledgerproof_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
///
/// A missing file maps to `NotFound` so callers can tell "absent" from
/// "unreadable".
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    let kind = match err.kind() {
        std::io::ErrorKind::NotFound => ExErrorKind::NotFound,
        _ => ExErrorKind::Io,
    };
    ExError::new(kind)
        .with_op(operation.to_string())
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create a not-found error for a keyed lookup
pub fn not_found(operation: &str, what: &str, key: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(operation.to_string())
        .with_message(format!("{} '{}' not found", what, key))
}

/// Create an input validation error
pub fn invalid_input(operation: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(operation.to_string())
        .with_message(reason)
}

/// Create a serialization error from serde_json::Error
///
/// `origin` names what was being decoded (a file path or a dataset).
pub fn serialization_error(
    operation: &str,
    origin: impl std::fmt::Display,
    err: serde_json::Error,
) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(format!("{}: {}", origin, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let err = io_error(
            "load_dataset",
            Path::new("/nope.json"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert!(err.message().contains("/nope.json"));
    }

    #[test]
    fn test_other_io_is_io() {
        let err = io_error(
            "save_manifest",
            Path::new("m.json"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("save_manifest"));
    }
}
