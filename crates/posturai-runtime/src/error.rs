//! Error types for the runtime

use posturai_analysis::CatalogError;
use thiserror::Error;

use crate::{SessionAction, SessionState};

/// Rejected engine configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Smoothing factor must lie in (0, 1], got {0}")]
    InvalidSmoothingAlpha(f64),

    #[error("Confidence threshold must lie in [0, 1), got {0}")]
    InvalidConfidenceThreshold(f64),

    #[error("Frame budget must be non-zero")]
    ZeroFrameBudget,
}

/// Runtime errors
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: SessionState,
        action: SessionAction,
    },
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
