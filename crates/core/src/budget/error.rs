//! Budget error types.

use sasper_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Period resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Month outside 1-12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// Year outside the representable calendar range.
    #[error("Invalid year: {0}")]
    InvalidYear(i32),
}

/// Budget-check errors.
///
/// Missing budgets and period mismatches are not errors; they are successful
/// outcomes of the check.
#[derive(Debug, Error)]
pub enum BudgetCheckError {
    /// Request fields missing or blank.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Storage failed while loading the budget or summing spend.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The stored budget period could not be resolved.
    #[error(transparent)]
    Period(#[from] PeriodError),
}

impl BudgetCheckError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::Storage(_) | Self::Period(_) => 500,
        }
    }
}

impl From<BudgetCheckError> for AppError {
    fn from(err: BudgetCheckError) -> Self {
        match err {
            BudgetCheckError::InvalidRequest(msg) => Self::Validation(msg),
            BudgetCheckError::Storage(e) => Self::Database(e.to_string()),
            BudgetCheckError::Period(e) => Self::Internal(e.to_string()),
        }
    }
}
