//! Property-based tests for budget thresholds and periods.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::period::BudgetPeriod;
use super::threshold::{NotificationOutcome, evaluate};

/// Strategy for positive limits (0.01 to 1,000,000.00).
fn positive_limit() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for representable calendar dates.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1970i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

proptest! {
    /// Spending exactly the limit is always exceeded at 100%.
    #[test]
    fn test_full_spend_is_exceeded(limit in positive_limit()) {
        prop_assert_eq!(evaluate(limit, limit), NotificationOutcome::Exceeded(dec!(100)));
    }

    /// Spending 80% of the limit is always a warning.
    #[test]
    fn test_eighty_percent_is_warning(limit in positive_limit()) {
        let outcome = evaluate(limit * dec!(0.8), limit);
        prop_assert_eq!(outcome, NotificationOutcome::Warning(dec!(80)));
    }

    /// Spending 79% of the limit never notifies.
    #[test]
    fn test_seventy_nine_percent_is_none(limit in positive_limit()) {
        prop_assert_eq!(evaluate(limit * dec!(0.79), limit), NotificationOutcome::None);
    }

    /// Anything in [80%, 100%) is a warning, never exceeded.
    #[test]
    fn test_warning_band(limit in positive_limit(), permille in 800i64..1000) {
        let spent = limit * Decimal::new(permille, 3);
        prop_assert!(matches!(evaluate(spent, limit), NotificationOutcome::Warning(_)));
    }

    /// A zero limit never notifies, whatever was spent.
    #[test]
    fn test_zero_limit_never_notifies(spent in positive_limit()) {
        prop_assert_eq!(evaluate(spent, Decimal::ZERO), NotificationOutcome::None);
    }

    /// Evaluation is deterministic.
    #[test]
    fn test_evaluate_is_deterministic(spent in positive_limit(), limit in positive_limit()) {
        prop_assert_eq!(evaluate(spent, limit), evaluate(spent, limit));
    }

    /// The range always spans exactly the budget's calendar month.
    #[test]
    fn test_range_covers_whole_month(today in any_date(), month in 1u32..=12, year in 1970i32..2100) {
        let period = BudgetPeriod::resolve(today, month, year).unwrap();

        prop_assert_eq!(period.range_start.day(), 1);
        prop_assert_eq!(period.range_start.month(), month);
        prop_assert_eq!(period.range_end.month(), month);
        prop_assert_eq!(period.range_end.year(), year);
        prop_assert_ne!(period.range_end.succ_opt().map(|d| d.month()), Some(month));
    }

    /// A date is in period exactly when it falls in the budget's month.
    #[test]
    fn test_in_period_matches_own_month(today in any_date()) {
        let own = BudgetPeriod::resolve(today, today.month(), today.year()).unwrap();
        prop_assert!(own.in_period);
        prop_assert!(own.contains_date(today));

        let other_year = BudgetPeriod::resolve(today, today.month(), today.year() + 1).unwrap();
        prop_assert!(!other_year.in_period);
        prop_assert!(!other_year.contains_date(today));
    }
}
