//! Budget check run after a transaction is recorded.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info};
use validator::Validate;

use super::aggregate::SpendAggregator;
use super::error::BudgetCheckError;
use super::period::BudgetPeriod;
use super::threshold::{evaluate, percentage_spent};
use super::types::{
    BELOW_THRESHOLD_MESSAGE, BudgetCheckOutcome, CheckBudgetRequest, NO_BUDGET_MESSAGE,
    NOT_NOTIFIED_MESSAGE, NOTIFIED_MESSAGE, OUTSIDE_PERIOD_MESSAGE,
};
use crate::notify::{NotificationDispatcher, PushSender, SkipReason};
use crate::store::{BudgetStore, ProfileStore, TransactionStore};

/// Checks a category budget and notifies the user when a threshold is hit.
///
/// Every call reads fresh state. Repeated calls with unchanged totals notify
/// again; nothing records which thresholds were already announced.
#[derive(Clone)]
pub struct BudgetCheckService {
    budgets: Arc<dyn BudgetStore>,
    aggregator: SpendAggregator,
    dispatcher: NotificationDispatcher,
}

impl BudgetCheckService {
    /// Creates the service from its collaborators.
    #[must_use]
    pub fn new(
        budgets: Arc<dyn BudgetStore>,
        transactions: Arc<dyn TransactionStore>,
        profiles: Arc<dyn ProfileStore>,
        sender: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            budgets,
            aggregator: SpendAggregator::new(transactions),
            dispatcher: NotificationDispatcher::new(profiles, sender),
        }
    }

    /// Runs the check for a transaction recorded on `today`.
    ///
    /// # Errors
    ///
    /// Returns `BudgetCheckError::InvalidRequest` for a blank user or
    /// category, and `BudgetCheckError::Storage` if the budget or spend
    /// cannot be read. Delivery problems are not errors.
    pub async fn check_on_transaction(
        &self,
        request: &CheckBudgetRequest,
        today: NaiveDate,
    ) -> Result<BudgetCheckOutcome, BudgetCheckError> {
        if let Err(errors) = request.validate() {
            debug!(errors = %errors, "Rejected budget check request");
            return Err(BudgetCheckError::InvalidRequest(errors.to_string()));
        }
        let user_id = request.user_id.as_str();
        let category = request.category.as_str();

        let budget = self
            .budgets
            .find_budget(user_id, category, today)
            .await
            .inspect_err(|e| error!(user_id, category, error = %e, "Failed to load budget"))?;
        let Some(budget) = budget else {
            debug!(user_id, category, "No budget for category");
            return Ok(BudgetCheckOutcome::finished(NO_BUDGET_MESSAGE));
        };

        let period = BudgetPeriod::resolve(today, budget.month(), budget.year())?;
        if !period.in_period {
            debug!(
                user_id,
                category,
                budget_month = budget.month(),
                budget_year = budget.year(),
                %today,
                "Transaction outside budget period"
            );
            return Ok(BudgetCheckOutcome::finished(OUTSIDE_PERIOD_MESSAGE));
        }

        let spent = self
            .aggregator
            .sum_expenses(user_id, category, period.range_start, period.range_end)
            .await
            .inspect_err(|e| {
                error!(
                    user_id,
                    category,
                    range_start = %period.range_start,
                    range_end = %period.range_end,
                    error = %e,
                    "Failed to sum expenses"
                );
            })?;

        let outcome = evaluate(spent, budget.amount());
        let percentage = percentage_spent(spent, budget.amount()).round_dp(2);
        info!(
            user_id,
            category,
            %spent,
            limit = %budget.amount(),
            %percentage,
            "Budget evaluated"
        );

        let dispatch = self.dispatcher.dispatch(user_id, category, &outcome).await;
        let message = match dispatch.reason {
            None => NOTIFIED_MESSAGE,
            Some(SkipReason::BelowThreshold) => BELOW_THRESHOLD_MESSAGE,
            Some(SkipReason::NoToken | SkipReason::DeliveryFailed) => NOT_NOTIFIED_MESSAGE,
        };

        Ok(BudgetCheckOutcome {
            success: true,
            message: message.to_string(),
            notified: dispatch.sent,
            reason: dispatch.reason,
            percentage: Some(percentage),
        })
    }
}
