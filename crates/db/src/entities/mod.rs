//! `SeaORM` entities for the SasPer schema.

pub mod budgets;
pub mod profiles;
pub mod recurring_transactions;
pub mod transactions;
