use ledgerproof_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using LedgerProofError
pub type Result<T> = std::result::Result<T, LedgerProofError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and process exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Commitment
    /// A record value has no canonical form (non-finite number)
    UnsupportedValueKind,
    /// Zero leaves handed to the tree builder
    EmptyBatch,
    /// Proof requested for a leaf position that does not exist
    IndexOutOfRange,

    // Verification
    /// Proof, leaf hash or root is structurally invalid
    MalformedProof,

    // Structural/Validation
    InvalidInput,
    NotFound,
    /// Anchored root disagrees with the recomputed root
    RootMismatch,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnsupportedValueKind => "ERR_UNSUPPORTED_VALUE_KIND",
            ExErrorKind::EmptyBatch => "ERR_EMPTY_BATCH",
            ExErrorKind::IndexOutOfRange => "ERR_INDEX_OUT_OF_RANGE",
            ExErrorKind::MalformedProof => "ERR_MALFORMED_PROOF",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::RootMismatch => "ERR_ROOT_MISMATCH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus context
/// (operation, record, leaf index, correlation ids) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    record_id: Option<String>,
    index: Option<usize>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record_id: None,
            index: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record identifier context
    pub fn with_record_id(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    /// Add leaf index context
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(record_id) = &self.record_id {
            write!(f, " (record_id: {})", record_id)?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {})", index)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        if let Some(trace_id) = &self.trace_id {
            write!(f, " (trace_id: {})", trace_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for commitment and proof operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerProofError {
    // ===== Commitment Errors =====
    /// Value at `path` has no canonical representation
    #[error("Unsupported value at {path}: {reason}")]
    UnsupportedValueKind { path: String, reason: String },

    /// Tree builder was handed zero leaves
    #[error("Cannot commit an empty batch")]
    EmptyBatch,

    /// Proof requested for a nonexistent leaf
    #[error("Leaf index {index} out of range for batch of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    // ===== Verification Errors =====
    /// Proof input is structurally invalid (bad flag, bad digest encoding)
    #[error("Malformed proof{}: {reason}", step_suffix(.step))]
    MalformedProof { step: Option<usize>, reason: String },

    /// A hex digest could not be decoded to 32 bytes
    #[error("Invalid digest '{value}': {reason}")]
    InvalidDigest { value: String, reason: String },

    // ===== Input Errors =====
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

fn step_suffix(step: &Option<usize>) -> String {
    match step {
        Some(step) => format!(" at step {}", step),
        None => String::new(),
    }
}

impl From<serde_json::Error> for LedgerProofError {
    fn from(err: serde_json::Error) -> Self {
        LedgerProofError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from LedgerProofError to ExError
impl From<LedgerProofError> for ExError {
    fn from(err: LedgerProofError) -> Self {
        match err {
            LedgerProofError::UnsupportedValueKind { path, reason } => {
                ExError::new(ExErrorKind::UnsupportedValueKind)
                    .with_op("canonicalize")
                    .with_message(format!("{} at {}", reason, path))
            }
            LedgerProofError::EmptyBatch => ExError::new(ExErrorKind::EmptyBatch)
                .with_op("compute_root")
                .with_message("Batch contains no leaves"),
            LedgerProofError::IndexOutOfRange { index, len } => {
                ExError::new(ExErrorKind::IndexOutOfRange)
                    .with_op("generate_proof")
                    .with_index(index)
                    .with_message(format!("Batch has {} leaves", len))
            }
            LedgerProofError::MalformedProof { step, reason } => {
                let err = ExError::new(ExErrorKind::MalformedProof)
                    .with_op("verify_proof")
                    .with_message(reason);
                match step {
                    Some(step) => err.with_index(step),
                    None => err,
                }
            }
            LedgerProofError::InvalidDigest { value, reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("parse_digest")
                    .with_message(format!("'{}': {}", value, reason))
            }
            LedgerProofError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }
            LedgerProofError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}
