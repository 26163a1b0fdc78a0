//! Storage seams.
//!
//! The core reads budgets, transactions, profiles and recurring transactions
//! through these traits only. The database crate implements them on top of
//! PostgreSQL; [`InMemoryStore`] implements them for tests and local runs.

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::records::{
    Budget, Profile, RecordError, RecurringTransaction, Transaction, TransactionKind,
};

pub use memory::InMemoryStore;

/// Storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not run the query.
    #[error("Database error: {0}")]
    Database(String),

    /// A row came back that does not form a valid record.
    #[error("Malformed {entity} record: {source}")]
    MalformedRecord {
        /// Table or entity name.
        entity: &'static str,
        /// Validation failure.
        source: RecordError,
    },
}

impl StoreError {
    /// Wraps a record validation failure for the given entity.
    #[must_use]
    pub const fn malformed(entity: &'static str, source: RecordError) -> Self {
        Self::MalformedRecord { entity, source }
    }
}

/// Query over a user's transactions.
///
/// Unset fields do not constrain the result. Date bounds are inclusive and
/// category matching is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Owner.
    pub user_id: String,
    /// Restrict to one kind.
    pub kind: Option<TransactionKind>,
    /// Restrict to one category.
    pub category: Option<String>,
    /// Earliest transaction date.
    pub date_from: Option<NaiveDate>,
    /// Latest transaction date.
    pub date_to: Option<NaiveDate>,
    /// Order by transaction date descending instead of ascending.
    pub newest_first: bool,
    /// Maximum number of rows.
    pub limit: Option<u64>,
}

impl TransactionFilter {
    /// Filter over all of a user's transactions.
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Returns true if the transaction satisfies every set constraint.
    ///
    /// Ordering and limit are not part of matching.
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        tx.user_id() == self.user_id
            && self.kind.is_none_or(|kind| tx.kind() == kind)
            && self
                .category
                .as_deref()
                .is_none_or(|category| tx.category() == category)
            && self
                .date_from
                .is_none_or(|from| tx.transaction_date() >= from)
            && self.date_to.is_none_or(|to| tx.transaction_date() <= to)
    }
}

/// Budget reads.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Returns the budget for `(user_id, category)` that applies on `today`.
    ///
    /// A budget whose month and year match `today` wins over budgets for
    /// other periods; among several for the same period the first created
    /// wins. With none for the current period, the first created budget of
    /// any period is returned.
    async fn find_budget(
        &self,
        user_id: &str,
        category: &str,
        today: NaiveDate,
    ) -> Result<Option<Budget>, StoreError>;
}

/// Transaction reads.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Returns the transactions matching `filter`.
    async fn find_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Sums the amount of every transaction matching `filter`.
    ///
    /// Zero when nothing matches. Backends that can aggregate natively
    /// should override this.
    async fn sum_amount(&self, filter: &TransactionFilter) -> Result<Decimal, StoreError> {
        let rows = self.find_transactions(filter).await?;
        Ok(rows.iter().map(Transaction::amount).sum())
    }
}

/// Profile reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns the profile whose id equals `user_id`.
    async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;
}

/// Recurring transactions falling due on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DueReminders {
    /// Valid rows, each carrying its owner's push token.
    pub reminders: Vec<RecurringTransaction>,
    /// Due rows skipped because they do not form a valid record.
    pub malformed: usize,
}

/// Recurring transaction reads.
#[async_trait]
pub trait RecurringStore: Send + Sync {
    /// Returns recurring transactions whose next due date is `date`, joined
    /// with their owner's push token. Rows without a profile are omitted.
    /// Malformed rows are logged, skipped and counted.
    async fn due_on(&self, date: NaiveDate) -> Result<DueReminders, StoreError>;
}
