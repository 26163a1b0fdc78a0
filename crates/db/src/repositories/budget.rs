//! Budget repository.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use sasper_core::records::Budget;
use sasper_core::store::{BudgetStore, StoreError};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

use super::{db_error, parse_user_id};
use crate::entities::budgets;

/// Reads budgets.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl budgets::Model {
    /// Converts the row into a validated budget.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedRecord` for a negative amount, a month
    /// outside 1-12 or a blank category.
    pub fn into_record(self) -> Result<Budget, StoreError> {
        Budget::new(
            self.user_id.to_string(),
            self.category,
            self.amount,
            self.month,
            self.year,
        )
        .map_err(|e| StoreError::malformed("budget", e))
    }
}

/// Budgets for `(user_id, category)`, the one for `today`'s month first,
/// then by creation.
fn budget_query(user_id: Uuid, category: &str, today: NaiveDate) -> Select<budgets::Entity> {
    let month = i32::try_from(today.month()).unwrap_or_default();
    let current_period = Expr::col(budgets::Column::Month)
        .eq(month)
        .and(Expr::col(budgets::Column::Year).eq(today.year()));

    budgets::Entity::find()
        .filter(budgets::Column::UserId.eq(user_id))
        .filter(budgets::Column::Category.eq(category))
        .order_by_desc(current_period)
        .order_by_asc(budgets::Column::CreatedAt)
        .order_by_asc(budgets::Column::Id)
}

#[async_trait]
impl BudgetStore for BudgetRepository {
    async fn find_budget(
        &self,
        user_id: &str,
        category: &str,
        today: NaiveDate,
    ) -> Result<Option<Budget>, StoreError> {
        let Some(user_id) = parse_user_id(user_id) else {
            return Ok(None);
        };

        budget_query(user_id, category, today)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(budgets::Model::into_record)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sasper_core::records::RecordError;
    use sea_orm::{DbBackend, QueryTrait};

    fn row(month: i32) -> budgets::Model {
        budgets::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            category: "Food".to_string(),
            amount: dec!(250.00),
            month,
            year: 2024,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_row_converts() {
        let budget = row(2).into_record().unwrap();

        assert_eq!(budget.user_id(), "00000000-0000-0000-0000-000000000000");
        assert_eq!(budget.category(), "Food");
        assert_eq!(budget.amount(), dec!(250));
        assert_eq!(budget.month(), 2);
    }

    #[test]
    fn test_bad_month_is_malformed() {
        let err = row(13).into_record().unwrap_err();

        assert!(matches!(
            err,
            StoreError::MalformedRecord {
                entity: "budget",
                source: RecordError::MonthOutOfRange(13),
            }
        ));
    }

    #[test]
    fn test_query_orders_current_period_first() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let sql = budget_query(Uuid::nil(), "Food", today)
            .build(DbBackend::Postgres)
            .to_string();

        let order = sql.split("ORDER BY").nth(1).unwrap();
        assert!(order.contains(r#""month" = 3"#));
        assert!(order.contains(r#""year" = 2024"#));
        let period_at = order.find(r#""month" = 3"#).unwrap();
        let created_at = order.find(r#""created_at" ASC"#).unwrap();
        assert!(period_at < created_at);
    }
}
