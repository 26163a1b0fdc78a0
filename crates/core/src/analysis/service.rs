//! Financial analysis service.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::error::AnalysisError;
use super::model::LanguageModel;
use super::prompt::analysis_prompt;
use crate::store::{TransactionFilter, TransactionStore};

/// Number of most recent transactions fed to the model.
pub const RECENT_TRANSACTION_LIMIT: u64 = 50;

/// Returned instead of an analysis when the user has no transactions.
pub const EMPTY_HISTORY_TEXT: &str =
    "I couldn't find any transactions to analyze. Start recording your expenses to get your first analysis!";

/// Produces a narrative analysis of a user's recent spending.
#[derive(Clone)]
pub struct AnalysisService {
    transactions: Arc<dyn TransactionStore>,
    model: Arc<dyn LanguageModel>,
}

impl AnalysisService {
    /// Creates the service.
    #[must_use]
    pub fn new(transactions: Arc<dyn TransactionStore>, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            transactions,
            model,
        }
    }

    /// Analyzes the user's most recent transactions.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidRequest` for a blank user id, and a
    /// storage or model error if either collaborator fails.
    pub async fn analyze(&self, user_id: &str) -> Result<String, AnalysisError> {
        if user_id.trim().is_empty() {
            debug!("Rejected analysis request without user id");
            return Err(AnalysisError::InvalidRequest(
                "user_id is required".to_string(),
            ));
        }

        let filter = TransactionFilter {
            newest_first: true,
            limit: Some(RECENT_TRANSACTION_LIMIT),
            ..TransactionFilter::for_user(user_id)
        };
        let transactions = self
            .transactions
            .find_transactions(&filter)
            .await
            .inspect_err(|e| error!(user_id, error = %e, "Failed to load transactions"))?;

        if transactions.is_empty() {
            info!(user_id, "No transactions to analyze");
            return Ok(EMPTY_HISTORY_TEXT.to_string());
        }

        let prompt = analysis_prompt(&transactions)?;
        debug!(user_id, count = transactions.len(), "Requesting analysis");

        let analysis = self
            .model
            .generate(&prompt)
            .await
            .inspect_err(|e| error!(user_id, error = %e, "Analysis generation failed"))?;

        info!(user_id, count = transactions.len(), "Analysis generated");
        Ok(analysis)
    }
}
