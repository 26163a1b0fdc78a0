//! Analysis error types.

use sasper_shared::{AppError, LlmError};
use thiserror::Error;

use crate::store::StoreError;

/// Analysis errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No user id was given.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transactions could not be read.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The language model failed or returned nothing.
    #[error(transparent)]
    Model(#[from] LlmError),

    /// Transactions could not be rendered into the prompt.
    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::Storage(_) | Self::Model(_) | Self::Prompt(_) => 500,
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidRequest(msg) => Self::Validation(msg),
            AnalysisError::Storage(e) => Self::Database(e.to_string()),
            AnalysisError::Model(e) => Self::ExternalService(e.to_string()),
            AnalysisError::Prompt(e) => Self::Internal(e.to_string()),
        }
    }
}
