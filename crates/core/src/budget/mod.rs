//! Budget threshold checks run after a transaction is recorded.
//!
//! - Period resolution for a budget's calendar month
//! - Monthly expense aggregation per category
//! - Threshold evaluation (warning at 80%, exceeded at 100%)
//! - The check orchestrator that ties these to notification dispatch

pub mod aggregate;
pub mod error;
pub mod period;
pub mod service;
pub mod threshold;
pub mod types;

#[cfg(test)]
mod tests;

pub use aggregate::SpendAggregator;
pub use error::{BudgetCheckError, PeriodError};
pub use period::BudgetPeriod;
pub use service::BudgetCheckService;
pub use threshold::{
    EXCEEDED_PERCENT, NotificationOutcome, WARNING_PERCENT, evaluate, percentage_spent,
};
pub use types::{BudgetCheckOutcome, CheckBudgetRequest};
