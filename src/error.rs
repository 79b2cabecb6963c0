//! Error types for the details model and its external collaborators
//!
//! Model operations degrade to no-ops instead of failing; these errors only
//! surface at construction boundaries and inside the gene lookup worker.

use thiserror::Error;

/// Invalid qualifier field configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualifierError {
    #[error("numeric range start {from} is greater than its end {to}")]
    InvertedRange { from: i32, to: i32 },

    #[error("numeric range step must be positive, got {0}")]
    NonPositiveStep(i32),
}

/// Invalid gene construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneError {
    #[error("a gene needs an identifier or a symbol")]
    MissingIdentifier,
}

/// Failure talking to the gene-name service
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("gene-name request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("gene-name service answered {status} for {key}")]
    Status { status: u16, key: String },

    #[error("gene-name worker disconnected")]
    Disconnected,
}

/// A legend drop that was refused, carrying the message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title}: {message}")]
pub struct DropRejected {
    pub title: String,
    pub message: String,
}

impl DropRejected {
    pub fn new(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}
