//! Core business logic for SasPer.
//!
//! This crate holds the domain rules with no web or database dependencies.
//! Storage, push delivery and the language model are reached through traits
//! that the outer crates implement.
//!
//! # Modules
//!
//! - `records` - Validated domain records
//! - `store` - Storage traits and the in-memory store
//! - `budget` - Budget threshold checks
//! - `notify` - Push notification dispatch
//! - `analysis` - AI financial analysis
//! - `reminder` - Recurring transaction reminders

pub mod analysis;
pub mod budget;
pub mod notify;
pub mod records;
pub mod reminder;
pub mod store;
