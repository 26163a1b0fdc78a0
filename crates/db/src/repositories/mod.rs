//! Repository implementations of the core storage traits.
//!
//! Repositories hide the `SeaORM` details from the rest of the application
//! and turn rows into validated core records.

pub mod budget;
pub mod profile;
pub mod recurring;
pub mod transaction;

pub use budget::BudgetRepository;
pub use profile::ProfileRepository;
pub use recurring::RecurringRepository;
pub use transaction::TransactionRepository;

use sasper_core::store::StoreError;
use sea_orm::DbErr;
use tracing::debug;
use uuid::Uuid;

/// Maps a `SeaORM` error into the core storage error.
pub(crate) fn db_error(err: DbErr) -> StoreError {
    StoreError::Database(err.to_string())
}

/// User ids are UUIDs in the database. Anything else cannot own rows.
pub(crate) fn parse_user_id(user_id: &str) -> Option<Uuid> {
    let parsed = Uuid::parse_str(user_id.trim()).ok();
    if parsed.is_none() {
        debug!(user_id, "User id is not a UUID, no rows can match");
    }
    parsed
}
