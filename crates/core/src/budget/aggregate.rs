//! Monthly spend aggregation.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::records::TransactionKind;
use crate::store::{StoreError, TransactionFilter, TransactionStore};

/// Sums a user's expenses in one category over a date range.
#[derive(Clone)]
pub struct SpendAggregator {
    transactions: Arc<dyn TransactionStore>,
}

impl SpendAggregator {
    /// Creates an aggregator over the given transaction store.
    #[must_use]
    pub fn new(transactions: Arc<dyn TransactionStore>) -> Self {
        Self { transactions }
    }

    /// Sums expense amounts for `user_id` in `category` dated within
    /// `[range_start, range_end]`. Income is never counted.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the read fails.
    pub async fn sum_expenses(
        &self,
        user_id: &str,
        category: &str,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> Result<Decimal, StoreError> {
        let filter = expense_filter(user_id, category, range_start, range_end);
        self.transactions.sum_amount(&filter).await
    }
}

fn expense_filter(
    user_id: &str,
    category: &str,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> TransactionFilter {
    TransactionFilter {
        kind: Some(TransactionKind::Expense),
        category: Some(category.to_string()),
        date_from: Some(range_start),
        date_to: Some(range_end),
        ..TransactionFilter::for_user(user_id)
    }
}
