//! Recurring transaction repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sasper_core::records::{RecurringTransaction, TransactionKind};
use sasper_core::store::{DueReminders, RecurringStore, StoreError};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::warn;

use super::db_error;
use crate::entities::{profiles, recurring_transactions};

/// Reads recurring transactions that fall due.
#[derive(Debug, Clone)]
pub struct RecurringRepository {
    db: DatabaseConnection,
}

impl RecurringRepository {
    /// Creates a new recurring transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl recurring_transactions::Model {
    /// Converts the row into a recurring transaction carrying the owner's
    /// push token.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedRecord` when the type column holds an
    /// unknown spelling.
    pub fn into_record(
        self,
        owner: &profiles::Model,
    ) -> Result<RecurringTransaction, StoreError> {
        let kind: TransactionKind = self
            .r#type
            .parse()
            .map_err(|e| StoreError::malformed("recurring_transaction", e))?;

        RecurringTransaction::new(
            self.user_id.to_string(),
            self.description,
            kind,
            self.next_due_date,
            owner.fcm_token.clone(),
        )
        .map_err(|e| StoreError::malformed("recurring_transaction", e))
    }
}

/// Converts joined rows, dropping rows without an owner and counting the
/// ones that fail validation.
fn collect_due(
    rows: Vec<(recurring_transactions::Model, Option<profiles::Model>)>,
) -> DueReminders {
    let mut due = DueReminders::default();
    for (row, owner) in rows {
        let Some(owner) = owner else {
            continue;
        };
        let id = row.id;
        match row.into_record(&owner) {
            Ok(reminder) => due.reminders.push(reminder),
            Err(e) => {
                warn!(%id, error = %e, "Skipping malformed recurring transaction");
                due.malformed += 1;
            }
        }
    }
    due
}

#[async_trait]
impl RecurringStore for RecurringRepository {
    async fn due_on(&self, date: NaiveDate) -> Result<DueReminders, StoreError> {
        let rows = recurring_transactions::Entity::find()
            .filter(recurring_transactions::Column::NextDueDate.eq(date))
            .order_by_asc(recurring_transactions::Column::CreatedAt)
            .find_also_related(profiles::Entity)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(collect_due(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn row(user_id: Uuid, description: &str, kind: &str) -> recurring_transactions::Model {
        recurring_transactions::Model {
            id: Uuid::new_v4(),
            user_id,
            description: description.to_string(),
            amount: dec!(15.99),
            r#type: kind.to_string(),
            category: Some("Entertainment".to_string()),
            frequency: "monthly".to_string(),
            next_due_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            created_at: Utc::now().into(),
        }
    }

    fn owner(id: Uuid) -> profiles::Model {
        profiles::Model {
            id,
            fcm_token: Some("tok-9".to_string()),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_row_carries_owner_token() {
        let user_id = Uuid::new_v4();

        let reminder = row(user_id, "Netflix", "Gasto")
            .into_record(&owner(user_id))
            .unwrap();

        assert_eq!(reminder.kind(), TransactionKind::Expense);
        assert_eq!(reminder.push_token(), Some("tok-9"));
        assert_eq!(reminder.user_id(), user_id.to_string());
    }

    #[test]
    fn test_bad_row_skipped_and_counted() {
        let user_id = Uuid::new_v4();
        let rows = vec![
            (row(user_id, "Netflix", "Gasto"), Some(owner(user_id))),
            (row(user_id, "Swap", "Transfer"), Some(owner(user_id))),
            (row(user_id, "Salary", "Ingreso"), Some(owner(user_id))),
            (row(Uuid::new_v4(), "Orphan", "Gasto"), None),
        ];

        let due = collect_due(rows);

        let names: Vec<&str> = due
            .reminders
            .iter()
            .map(RecurringTransaction::description)
            .collect();
        assert_eq!(names, ["Netflix", "Salary"]);
        assert_eq!(due.malformed, 1);
    }
}
