//! AI-generated financial analysis of a user's recent transactions.

pub mod error;
pub mod model;
pub mod prompt;
pub mod service;

pub use error::AnalysisError;
pub use model::LanguageModel;
pub use service::{AnalysisService, EMPTY_HISTORY_TEXT, RECENT_TRANSACTION_LIMIT};
