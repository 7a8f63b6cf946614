//! Error types for core joint handling

use thiserror::Error;

/// Errors raised while resolving joint identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JointError {
    #[error("Unknown joint name: {0}")]
    UnknownName(String),

    #[error("Malformed unknown-joint key: {0}")]
    MalformedKey(String),
}

/// Result type for joint operations
pub type JointResult<T> = Result<T, JointError>;
