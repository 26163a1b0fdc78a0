//! In-memory store for tests and local development.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use super::{
    BudgetStore, DueReminders, ProfileStore, RecurringStore, StoreError, TransactionFilter,
    TransactionStore,
};
use crate::records::{Budget, Profile, RecurringTransaction, Transaction};

#[derive(Debug, Default)]
struct Tables {
    budgets: Vec<Budget>,
    transactions: Vec<Transaction>,
    profiles: Vec<Profile>,
    recurring: Vec<RecurringTransaction>,
}

/// Store holding every table in memory, in insertion order.
///
/// A store built with [`InMemoryStore::unavailable`] fails every read, which
/// lets callers exercise their storage-error paths.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    unavailable: bool,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every read fails with a database error.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            tables: RwLock::default(),
            unavailable: true,
        }
    }

    /// Adds a budget.
    #[must_use]
    pub fn with_budget(self, budget: Budget) -> Self {
        self.write(|t| t.budgets.push(budget));
        self
    }

    /// Adds a transaction.
    #[must_use]
    pub fn with_transaction(self, transaction: Transaction) -> Self {
        self.write(|t| t.transactions.push(transaction));
        self
    }

    /// Adds a profile.
    #[must_use]
    pub fn with_profile(self, profile: Profile) -> Self {
        self.write(|t| t.profiles.push(profile));
        self
    }

    /// Adds a recurring transaction.
    #[must_use]
    pub fn with_recurring(self, recurring: RecurringTransaction) -> Self {
        self.write(|t| t.recurring.push(recurring));
        self
    }

    fn write(&self, f: impl FnOnce(&mut Tables)) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut tables);
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T, StoreError> {
        if self.unavailable {
            return Err(StoreError::Database("store unavailable".to_string()));
        }
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&tables))
    }
}

#[async_trait]
impl BudgetStore for InMemoryStore {
    async fn find_budget(
        &self,
        user_id: &str,
        category: &str,
        today: NaiveDate,
    ) -> Result<Option<Budget>, StoreError> {
        self.read(|t| {
            let mut owned = t
                .budgets
                .iter()
                .filter(|b| b.user_id() == user_id && b.category() == category);
            owned
                .clone()
                .find(|b| b.month() == today.month() && b.year() == today.year())
                .or_else(|| owned.next())
                .cloned()
        })
    }
}

#[async_trait]
impl TransactionStore for InMemoryStore {
    async fn find_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.read(|t| {
            let mut rows: Vec<Transaction> = t
                .transactions
                .iter()
                .filter(|tx| filter.matches(tx))
                .cloned()
                .collect();

            // stable sort keeps insertion order within a date
            rows.sort_by_key(Transaction::transaction_date);
            if filter.newest_first {
                rows.reverse();
            }
            if let Some(limit) = filter.limit {
                rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            }
            rows
        })
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        self.read(|t| t.profiles.iter().find(|p| p.user_id() == user_id).cloned())
    }
}

#[async_trait]
impl RecurringStore for InMemoryStore {
    async fn due_on(&self, date: NaiveDate) -> Result<DueReminders, StoreError> {
        self.read(|t| {
            let reminders = t
                .recurring
                .iter()
                .filter(|r| r.next_due_date() == date)
                .filter_map(|r| {
                    let owner = t.profiles.iter().find(|p| p.user_id() == r.user_id())?;
                    let token = owner.push_token().map(str::to_string);
                    Some(r.clone().with_push_token(token))
                })
                .collect();
            DueReminders {
                reminders,
                malformed: 0,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TransactionKind;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(description: &str, day: u32) -> Transaction {
        Transaction::new(
            "u1",
            description,
            dec!(10),
            TransactionKind::Expense,
            "Food",
            date(2024, 2, day),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_current_period_budget_wins() {
        let store = InMemoryStore::new()
            .with_budget(Budget::new("u1", "Food", dec!(100), 2, 2024).unwrap())
            .with_budget(Budget::new("u1", "Food", dec!(300), 3, 2024).unwrap());

        let budget = store
            .find_budget("u1", "Food", date(2024, 3, 10))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(budget.amount(), dec!(300));
        assert_eq!(budget.month(), 3);
    }

    #[tokio::test]
    async fn test_first_budget_wins_within_period() {
        let store = InMemoryStore::new()
            .with_budget(Budget::new("u1", "Food", dec!(100), 2, 2024).unwrap())
            .with_budget(Budget::new("u1", "Food", dec!(999), 2, 2024).unwrap());

        let budget = store
            .find_budget("u1", "Food", date(2024, 2, 10))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(budget.amount(), dec!(100));
    }

    #[tokio::test]
    async fn test_no_current_budget_falls_back_to_first_created() {
        let store = InMemoryStore::new()
            .with_budget(Budget::new("u1", "Food", dec!(100), 1, 2024).unwrap())
            .with_budget(Budget::new("u1", "Food", dec!(200), 2, 2024).unwrap());

        let budget = store
            .find_budget("u1", "Food", date(2024, 5, 1))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(budget.month(), 1);
    }

    #[tokio::test]
    async fn test_budget_category_is_case_sensitive() {
        let store = InMemoryStore::new()
            .with_budget(Budget::new("u1", "Food", dec!(100), 2, 2024).unwrap());

        let found = store
            .find_budget("u1", "food", date(2024, 2, 10))
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_newest_first_with_limit() {
        let store = InMemoryStore::new()
            .with_transaction(tx("a", 1))
            .with_transaction(tx("c", 20))
            .with_transaction(tx("b", 10));

        let filter = TransactionFilter {
            newest_first: true,
            limit: Some(2),
            ..TransactionFilter::for_user("u1")
        };
        let rows = store.find_transactions(&filter).await.unwrap();

        let names: Vec<&str> = rows.iter().map(Transaction::description).collect();
        assert_eq!(names, ["c", "b"]);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_reads() {
        let store = InMemoryStore::unavailable();

        let err = store.find_profile("u1").await.unwrap_err();

        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn test_due_on_skips_rows_without_profile() {
        let due = date(2024, 2, 15);
        let store = InMemoryStore::new()
            .with_profile(Profile::new("u1", Some("tok".to_string())).unwrap())
            .with_recurring(
                RecurringTransaction::new("u1", "Rent", TransactionKind::Expense, due, None)
                    .unwrap(),
            )
            .with_recurring(
                RecurringTransaction::new("ghost", "Gym", TransactionKind::Expense, due, None)
                    .unwrap(),
            );

        let due_rows = store.due_on(due).await.unwrap();
        let rows = due_rows.reminders;

        assert_eq!(due_rows.malformed, 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description(), "Rent");
        assert_eq!(rows[0].push_token(), Some("tok"));
    }
}
