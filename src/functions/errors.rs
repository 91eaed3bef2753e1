//! # Function Errors

use thiserror::Error;

/// Result type for function operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Failures of the invocation plumbing, not of the contacts contract
#[derive(Debug, Clone, Error)]
pub enum FunctionError {
    #[error("Invalid function response: {0}")]
    InvalidResponse(String),
}

impl FunctionError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            FunctionError::InvalidResponse(_) => 500,
        }
    }
}
