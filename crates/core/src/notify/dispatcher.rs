//! Budget notification dispatch.

use std::sync::Arc;

use sasper_shared::PushMessage;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::sender::PushSender;
use crate::budget::NotificationOutcome;
use crate::store::ProfileStore;

/// Screen the app opens when a budget notification is tapped.
pub const BUDGETS_SCREEN: &str = "/budgets";

/// Why a notification was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Spend is below the warning threshold.
    BelowThreshold,
    /// The user has no profile or no push token.
    NoToken,
    /// The push channel (or the token lookup) failed.
    DeliveryFailed,
}

impl SkipReason {
    /// Wire name of the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BelowThreshold => "below_threshold",
            Self::NoToken => "no_token",
            Self::DeliveryFailed => "delivery_failed",
        }
    }
}

/// Result of one dispatch attempt. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    /// Whether the push channel accepted the message.
    pub sent: bool,
    /// Why nothing was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
    /// Failure detail for `delivery_failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl DispatchResult {
    /// The message was delivered.
    #[must_use]
    pub const fn sent() -> Self {
        Self {
            sent: true,
            reason: None,
            detail: None,
        }
    }

    /// Nothing was sent, for `reason`.
    #[must_use]
    pub const fn skipped(reason: SkipReason) -> Self {
        Self {
            sent: false,
            reason: Some(reason),
            detail: None,
        }
    }

    /// Delivery was attempted and failed.
    #[must_use]
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            sent: false,
            reason: Some(SkipReason::DeliveryFailed),
            detail: Some(detail.into()),
        }
    }
}

/// Title and body for a budget outcome; `None` when nothing is due.
#[must_use]
pub fn budget_notification(category: &str, outcome: &NotificationOutcome) -> Option<(&'static str, String)> {
    match outcome {
        NotificationOutcome::None => None,
        NotificationOutcome::Warning(pct) => Some((
            "Budget Alert",
            format!(
                "You have used {}% of your {category} budget this month.",
                pct.round_dp(0)
            ),
        )),
        NotificationOutcome::Exceeded(pct) => Some((
            "Budget Exceeded",
            format!(
                "You have exceeded your {category} budget: {}% used this month.",
                pct.round_dp(0)
            ),
        )),
    }
}

/// Resolves a user's push token and sends budget notifications.
#[derive(Clone)]
pub struct NotificationDispatcher {
    profiles: Arc<dyn ProfileStore>,
    sender: Arc<dyn PushSender>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher.
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileStore>, sender: Arc<dyn PushSender>) -> Self {
        Self { profiles, sender }
    }

    /// Sends the notification for `outcome`, if one is due.
    ///
    /// At most one delivery attempt is made. Failures are logged and
    /// returned in the result rather than raised.
    pub async fn dispatch(
        &self,
        user_id: &str,
        category: &str,
        outcome: &NotificationOutcome,
    ) -> DispatchResult {
        let Some((title, body)) = budget_notification(category, outcome) else {
            return DispatchResult::skipped(SkipReason::BelowThreshold);
        };

        let token = match self.profiles.find_profile(user_id).await {
            Ok(profile) => profile.and_then(|p| p.push_token().map(str::to_string)),
            Err(e) => {
                warn!(user_id, error = %e, "Failed to look up push token");
                return DispatchResult::failed(e.to_string());
            }
        };

        let Some(token) = token else {
            debug!(user_id, "No push token, notification skipped");
            return DispatchResult::skipped(SkipReason::NoToken);
        };

        let message = PushMessage::new(token, title, body).with_screen(BUDGETS_SCREEN);
        match self.sender.send(&message).await {
            Ok(()) => {
                info!(user_id, category, title, "Budget notification sent");
                DispatchResult::sent()
            }
            Err(e) => {
                warn!(user_id, category, error = %e, "Budget notification delivery failed");
                DispatchResult::failed(e.to_string())
            }
        }
    }
}
