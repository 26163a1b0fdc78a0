//! Budget period resolution.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::error::PeriodError;

/// The calendar month a budget covers, relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetPeriod {
    /// Whether the reference date falls in the budget's month.
    pub in_period: bool,
    /// First day of the month.
    pub range_start: NaiveDate,
    /// Last day of the month.
    pub range_end: NaiveDate,
}

impl BudgetPeriod {
    /// Resolves the month `budget_month`/`budget_year` against `today`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidMonth` for a month outside 1-12 and
    /// `PeriodError::InvalidYear` when the month cannot be represented.
    pub fn resolve(
        today: NaiveDate,
        budget_month: u32,
        budget_year: i32,
    ) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&budget_month) {
            return Err(PeriodError::InvalidMonth(budget_month));
        }

        let range_start = NaiveDate::from_ymd_opt(budget_year, budget_month, 1)
            .ok_or(PeriodError::InvalidYear(budget_year))?;
        let range_end = last_day_of_month(budget_month, budget_year)
            .ok_or(PeriodError::InvalidYear(budget_year))?;

        Ok(Self {
            in_period: today.month() == budget_month && today.year() == budget_year,
            range_start,
            range_end,
        })
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.range_start && date <= self.range_end
    }
}

/// Day before the first of the next month.
fn last_day_of_month(month: u32, year: i32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_february_in_period() {
        let period = BudgetPeriod::resolve(date(2024, 2, 15), 2, 2024).unwrap();

        assert!(period.in_period);
        assert_eq!(period.range_start, date(2024, 2, 1));
        assert_eq!(period.range_end, date(2024, 2, 29));
    }

    #[test]
    fn test_next_month_out_of_period() {
        let period = BudgetPeriod::resolve(date(2024, 3, 1), 2, 2024).unwrap();

        assert!(!period.in_period);
        assert_eq!(period.range_end, date(2024, 2, 29));
    }

    #[test]
    fn test_same_month_other_year_out_of_period() {
        let period = BudgetPeriod::resolve(date(2025, 2, 10), 2, 2024).unwrap();
        assert!(!period.in_period);
    }

    #[rstest]
    #[case(1, 2023, 31)]
    #[case(2, 2023, 28)]
    #[case(2, 1900, 28)]
    #[case(2, 2000, 29)]
    #[case(4, 2024, 30)]
    #[case(12, 2024, 31)]
    fn test_month_lengths(#[case] month: u32, #[case] year: i32, #[case] last_day: u32) {
        let period = BudgetPeriod::resolve(date(2024, 6, 1), month, year).unwrap();

        assert_eq!(period.range_start, date(year, month, 1));
        assert_eq!(period.range_end, date(year, month, last_day));
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn test_invalid_month(#[case] month: u32) {
        assert_eq!(
            BudgetPeriod::resolve(date(2024, 1, 1), month, 2024),
            Err(PeriodError::InvalidMonth(month))
        );
    }

    #[test]
    fn test_unrepresentable_year() {
        assert_eq!(
            BudgetPeriod::resolve(date(2024, 1, 1), 1, i32::MAX),
            Err(PeriodError::InvalidYear(i32::MAX))
        );
    }

    #[test]
    fn test_contains_date_bounds_inclusive() {
        let period = BudgetPeriod::resolve(date(2024, 2, 15), 2, 2024).unwrap();

        assert!(period.contains_date(date(2024, 2, 1)));
        assert!(period.contains_date(date(2024, 2, 29)));
        assert!(!period.contains_date(date(2024, 1, 31)));
        assert!(!period.contains_date(date(2024, 3, 1)));
    }
}
