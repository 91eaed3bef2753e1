//! # Store Errors
//!
//! `DocumentError` is what a document client reports. `StoreError` is what the
//! contact store surfaces: a generic per-operation message with the client
//! failure kept as its source.

use std::fmt;

use thiserror::Error;

/// Result type for document client calls
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Result type for contact store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by a document client
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an error status
    #[error("{message} (status {code}, {kind})")]
    Api {
        code: u16,
        kind: String,
        message: String,
    },

    /// No document with this identifier
    #[error("Document with the requested ID could not be found: {0}")]
    NotFound(String),

    /// The service returned a body that could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),

    /// The client could not be built from its settings
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl DocumentError {
    /// Whether the failure means the target document does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            DocumentError::NotFound(_) => true,
            DocumentError::Api { code, .. } => *code == 404,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::Decode(e.to_string())
    }
}

/// Contact store operations, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Upsert,
    Delete,
    DeleteAll,
}

impl StoreOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOp::List => "list contacts",
            StoreOp::Upsert => "upsert contacts",
            StoreOp::Delete => "delete contact",
            StoreOp::DeleteAll => "delete contacts",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed contact store operation.
///
/// Displays only the generic message; the client failure is the source.
#[derive(Debug, Error)]
#[error("Failed to {op}")]
pub struct StoreError {
    op: StoreOp,
    #[source]
    source: DocumentError,
}

impl StoreError {
    pub fn new(op: StoreOp, source: DocumentError) -> Self {
        Self { op, source }
    }

    /// Operation that failed
    pub fn op(&self) -> StoreOp {
        self.op
    }

    /// Underlying client failure
    pub fn cause(&self) -> &DocumentError {
        &self.source
    }

    pub fn is_not_found(&self) -> bool {
        self.source.is_not_found()
    }
}
