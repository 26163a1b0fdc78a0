//! Budget threshold evaluation.

use rust_decimal::Decimal;
use serde::Serialize;

/// Percentage at which a warning is due.
pub const WARNING_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Percentage at which the budget counts as exceeded.
pub const EXCEEDED_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// What, if anything, to tell the user about their spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "percentage", rename_all = "snake_case")]
pub enum NotificationOutcome {
    /// Below the warning threshold.
    None,
    /// At or above 80% and below 100%.
    Warning(Decimal),
    /// At or above 100%.
    Exceeded(Decimal),
}

impl NotificationOutcome {
    /// Percentage carried by a warning or exceeded outcome.
    #[must_use]
    pub const fn percentage(&self) -> Option<Decimal> {
        match self {
            Self::None => None,
            Self::Warning(p) | Self::Exceeded(p) => Some(*p),
        }
    }

    /// Returns true when a notification should be sent.
    #[must_use]
    pub const fn is_notifiable(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Percentage of `limit` consumed by `spent`.
///
/// Zero when the limit is zero. Saturates instead of overflowing.
#[must_use]
pub fn percentage_spent(spent: Decimal, limit: Decimal) -> Decimal {
    if limit.is_zero() {
        return Decimal::ZERO;
    }

    spent
        .checked_div(limit)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if spent.is_sign_negative() == limit.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

/// Maps spend against a limit to a notification outcome.
///
/// Exactly 80% is a warning and exactly 100% is exceeded. Identical inputs
/// always give the same outcome.
#[must_use]
pub fn evaluate(spent: Decimal, limit: Decimal) -> NotificationOutcome {
    let percentage = percentage_spent(spent, limit);

    if percentage >= EXCEEDED_PERCENT {
        NotificationOutcome::Exceeded(percentage)
    } else if percentage >= WARNING_PERCENT {
        NotificationOutcome::Warning(percentage)
    } else {
        NotificationOutcome::None
    }
}
