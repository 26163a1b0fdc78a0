//! Budget-check request and outcome types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::notify::SkipReason;

/// Message when the user has no budget for the category.
pub const NO_BUDGET_MESSAGE: &str = "no budget for category";
/// Message when the budget belongs to another month.
pub const OUTSIDE_PERIOD_MESSAGE: &str = "transaction outside budget period";
/// Message when spend is below the warning threshold.
pub const BELOW_THRESHOLD_MESSAGE: &str = "threshold not reached";
/// Message when a notification was delivered.
pub const NOTIFIED_MESSAGE: &str = "notification sent";
/// Message when a notification was due but not delivered.
pub const NOT_NOTIFIED_MESSAGE: &str = "notification not sent";

/// A transaction was just recorded for `category`; check its budget.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CheckBudgetRequest {
    /// Owner of the transaction.
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "user_id is required"))]
    pub user_id: String,
    /// Category of the transaction.
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "category is required"))]
    pub category: String,
}

impl CheckBudgetRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(user_id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            category: category.into(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Terminal result of a successful budget check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetCheckOutcome {
    /// Always true; failures are reported as errors instead.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Whether a push notification was delivered.
    pub notified: bool,
    /// Why no notification went out, when one was considered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
    /// Percentage of the budget spent, rounded to two places.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
}

impl BudgetCheckOutcome {
    /// Successful check that ended before evaluation.
    #[must_use]
    pub fn finished(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            notified: false,
            reason: None,
            percentage: None,
        }
    }
}
