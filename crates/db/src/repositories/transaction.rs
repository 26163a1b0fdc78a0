//! Transaction repository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sasper_core::records::{Transaction, TransactionKind};
use sasper_core::store::{StoreError, TransactionFilter, TransactionStore};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::warn;
use uuid::Uuid;

use super::{db_error, parse_user_id};
use crate::entities::transactions;

/// Reads transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl transactions::Model {
    /// Converts the row into a validated transaction.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedRecord` when the type column holds an
    /// unknown spelling.
    pub fn into_record(self) -> Result<Transaction, StoreError> {
        let kind: TransactionKind = self
            .r#type
            .parse()
            .map_err(|e| StoreError::malformed("transaction", e))?;

        Transaction::new(
            self.user_id.to_string(),
            self.description.unwrap_or_default(),
            self.amount,
            kind,
            self.category,
            self.transaction_date,
        )
        .map_err(|e| StoreError::malformed("transaction", e))
    }
}

/// Builds the SQL condition for `filter`. The type column is matched
/// case-insensitively against every stored spelling of the kind.
fn filter_condition(user_id: Uuid, filter: &TransactionFilter) -> Condition {
    let mut condition = Condition::all().add(transactions::Column::UserId.eq(user_id));

    if let Some(kind) = filter.kind {
        let spellings: Vec<String> = kind
            .stored_spellings()
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        condition = condition
            .add(Expr::expr(Func::lower(Expr::col(transactions::Column::Type))).is_in(spellings));
    }
    if let Some(category) = &filter.category {
        condition = condition.add(transactions::Column::Category.eq(category.as_str()));
    }
    if let Some(from) = filter.date_from {
        condition = condition.add(transactions::Column::TransactionDate.gte(from));
    }
    if let Some(to) = filter.date_to {
        condition = condition.add(transactions::Column::TransactionDate.lte(to));
    }

    condition
}

/// Converts rows, logging and dropping the ones that fail validation.
fn keep_valid(rows: Vec<transactions::Model>) -> Vec<Transaction> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            row.into_record()
                .inspect_err(|e| warn!(%id, error = %e, "Skipping malformed transaction"))
                .ok()
        })
        .collect()
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn find_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        let Some(user_id) = parse_user_id(&filter.user_id) else {
            return Ok(Vec::new());
        };

        let mut query = transactions::Entity::find().filter(filter_condition(user_id, filter));
        query = if filter.newest_first {
            query
                .order_by_desc(transactions::Column::TransactionDate)
                .order_by_desc(transactions::Column::CreatedAt)
        } else {
            query
                .order_by_asc(transactions::Column::TransactionDate)
                .order_by_asc(transactions::Column::CreatedAt)
        };
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let rows = query.all(&self.db).await.map_err(db_error)?;
        Ok(keep_valid(rows))
    }

    async fn sum_amount(&self, filter: &TransactionFilter) -> Result<Decimal, StoreError> {
        let Some(user_id) = parse_user_id(&filter.user_id) else {
            return Ok(Decimal::ZERO);
        };

        let total: Option<Option<Decimal>> = transactions::Entity::find()
            .filter(filter_condition(user_id, filter))
            .select_only()
            .column_as(Expr::col(transactions::Column::Amount).sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }
}
