//! Daily recurring-transaction reminder job.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use futures::future::join_all;
use sasper_shared::{AppError, PushMessage};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::notify::PushSender;
use crate::records::{RecurringTransaction, TransactionKind};
use crate::store::{DueReminders, RecurringStore, StoreError};

/// Screen the app opens when a reminder is tapped.
pub const RECURRING_SCREEN: &str = "/recurring_transactions";

/// Reminder job errors.
#[derive(Debug, Error)]
pub enum ReminderError {
    /// Due reminders could not be read.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// `today` is the last representable date.
    #[error("No date follows {0}")]
    DateOutOfRange(NaiveDate),
}

impl From<ReminderError> for AppError {
    fn from(err: ReminderError) -> Self {
        match err {
            ReminderError::Storage(e) => Self::Database(e.to_string()),
            ReminderError::DateOutOfRange(date) => Self::Internal(format!("No date follows {date}")),
        }
    }
}

/// Summary of one reminder run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReminderReport {
    /// The due date reminders were sent for.
    pub due_date: NaiveDate,
    /// Recurring transactions due on that date, malformed rows included.
    pub found: usize,
    /// Reminders accepted by the push channel.
    pub sent: usize,
    /// Reminders skipped for lack of a push token.
    pub skipped: usize,
    /// Reminders the push channel rejected, plus malformed rows.
    pub failed: usize,
    /// Due rows that could not be read as a reminder.
    pub malformed: usize,
}

/// Title and body for a reminder.
#[must_use]
pub fn reminder_notification(reminder: &RecurringTransaction) -> (&'static str, String) {
    let title = match reminder.kind() {
        TransactionKind::Expense => "Upcoming Payment Reminder",
        TransactionKind::Income => "Upcoming Income Reminder",
    };
    let body = format!(
        "Your next {} is: {}. Date: {}.",
        reminder.kind().label(),
        reminder.description(),
        reminder.next_due_date().format("%-d %B"),
    );
    (title, body)
}

enum Delivery {
    Sent,
    Skipped,
    Failed,
}

/// Sends reminders for recurring transactions due the next day.
#[derive(Clone)]
pub struct ReminderService {
    recurring: Arc<dyn RecurringStore>,
    sender: Arc<dyn PushSender>,
}

impl ReminderService {
    /// Creates the service.
    #[must_use]
    pub fn new(recurring: Arc<dyn RecurringStore>, sender: Arc<dyn PushSender>) -> Self {
        Self { recurring, sender }
    }

    /// Sends one reminder per recurring transaction due the day after `today`.
    ///
    /// Sends run concurrently; a failed send or a malformed row is counted
    /// as failed and never stops the others.
    ///
    /// # Errors
    ///
    /// Returns `ReminderError::Storage` if the due reminders cannot be read.
    pub async fn send_due_reminders(&self, today: NaiveDate) -> Result<ReminderReport, ReminderError> {
        let due_date = today
            .checked_add_days(Days::new(1))
            .ok_or(ReminderError::DateOutOfRange(today))?;

        let DueReminders {
            reminders,
            malformed,
        } = self
            .recurring
            .due_on(due_date)
            .await
            .inspect_err(|e| error!(%due_date, error = %e, "Failed to load due reminders"))?;

        let mut report = ReminderReport {
            due_date,
            found: reminders.len() + malformed,
            sent: 0,
            skipped: 0,
            failed: malformed,
            malformed,
        };
        if malformed > 0 {
            warn!(%due_date, malformed, "Skipped malformed recurring transactions");
        }
        if reminders.is_empty() {
            info!(%due_date, "No reminders due");
            return Ok(report);
        }
        info!(%due_date, count = reminders.len(), "Sending reminders");

        let deliveries = join_all(reminders.iter().map(|r| self.deliver(r))).await;
        for delivery in deliveries {
            match delivery {
                Delivery::Sent => report.sent += 1,
                Delivery::Skipped => report.skipped += 1,
                Delivery::Failed => report.failed += 1,
            }
        }

        info!(
            %due_date,
            sent = report.sent,
            skipped = report.skipped,
            failed = report.failed,
            malformed = report.malformed,
            "Reminders processed"
        );
        Ok(report)
    }

    async fn deliver(&self, reminder: &RecurringTransaction) -> Delivery {
        let Some(token) = reminder.push_token() else {
            warn!(
                user_id = reminder.user_id(),
                description = reminder.description(),
                "No push token, reminder skipped"
            );
            return Delivery::Skipped;
        };

        let (title, body) = reminder_notification(reminder);
        let message = PushMessage::new(token, title, body).with_screen(RECURRING_SCREEN);
        match self.sender.send(&message).await {
            Ok(()) => Delivery::Sent,
            Err(e) => {
                warn!(
                    user_id = reminder.user_id(),
                    description = reminder.description(),
                    error = %e,
                    "Reminder delivery failed"
                );
                Delivery::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::sender::MockPushSender;
    use crate::records::Profile;
    use crate::store::InMemoryStore;
    use async_trait::async_trait;
    use sasper_shared::PushError;

    /// Returns the same due rows for any date.
    struct FixedDue(DueReminders);

    #[async_trait]
    impl RecurringStore for FixedDue {
        async fn due_on(&self, _date: NaiveDate) -> Result<DueReminders, StoreError> {
            Ok(self.0.clone())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recurring(user: &str, description: &str, kind: TransactionKind, due: NaiveDate) -> RecurringTransaction {
        RecurringTransaction::new(user, description, kind, due, None).unwrap()
    }

    fn profile(user: &str, token: Option<&str>) -> Profile {
        Profile::new(user, token.map(str::to_string)).unwrap()
    }

    #[test]
    fn test_expense_reminder_text() {
        let r = recurring("u1", "Netflix", TransactionKind::Expense, date(2024, 3, 5));

        let (title, body) = reminder_notification(&r);

        assert_eq!(title, "Upcoming Payment Reminder");
        assert_eq!(body, "Your next expense is: Netflix. Date: 5 March.");
    }

    #[test]
    fn test_income_reminder_title() {
        let r = recurring("u1", "Salary", TransactionKind::Income, date(2024, 12, 31));

        let (title, body) = reminder_notification(&r);

        assert_eq!(title, "Upcoming Income Reminder");
        assert_eq!(body, "Your next income is: Salary. Date: 31 December.");
    }

    #[tokio::test]
    async fn test_sends_for_tomorrow_only() {
        let store = InMemoryStore::new()
            .with_profile(profile("u1", Some("tok-1")))
            .with_recurring(recurring("u1", "Rent", TransactionKind::Expense, date(2024, 3, 2)))
            .with_recurring(recurring("u1", "Gym", TransactionKind::Expense, date(2024, 3, 3)));
        let mut sender = MockPushSender::new();
        sender
            .expect_send()
            .withf(|m| {
                m.token == "tok-1"
                    && m.body.contains("Rent")
                    && m.data.get("screen").map(String::as_str) == Some(RECURRING_SCREEN)
            })
            .times(1)
            .returning(|_| Ok(()));

        let report = ReminderService::new(Arc::new(store), Arc::new(sender))
            .send_due_reminders(date(2024, 3, 1))
            .await
            .unwrap();

        assert_eq!(
            report,
            ReminderReport {
                due_date: date(2024, 3, 2),
                found: 1,
                sent: 1,
                skipped: 0,
                failed: 0,
                malformed: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_missing_token_skipped_and_failure_counted() {
        let due = date(2024, 3, 2);
        let store = InMemoryStore::new()
            .with_profile(profile("u1", Some("good")))
            .with_profile(profile("u2", None))
            .with_profile(profile("u3", Some("stale")))
            .with_recurring(recurring("u1", "Rent", TransactionKind::Expense, due))
            .with_recurring(recurring("u2", "Phone", TransactionKind::Expense, due))
            .with_recurring(recurring("u3", "Salary", TransactionKind::Income, due));
        let mut sender = MockPushSender::new();
        sender.expect_send().times(2).returning(|m| {
            if m.token == "stale" {
                Err(PushError::Rejected {
                    status: 200,
                    reason: "NotRegistered".to_string(),
                })
            } else {
                Ok(())
            }
        });

        let report = ReminderService::new(Arc::new(store), Arc::new(sender))
            .send_due_reminders(date(2024, 3, 1))
            .await
            .unwrap();

        assert_eq!(report.found, 3);
        assert_eq!(report.sent, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
    }

    #[tokio::test]
    async fn test_malformed_rows_counted_as_failed() {
        let due = date(2024, 3, 2);
        let store = FixedDue(DueReminders {
            reminders: vec![
                recurring("u1", "Rent", TransactionKind::Expense, due)
                    .with_push_token(Some("tok-1".to_string())),
            ],
            malformed: 2,
        });
        let mut sender = MockPushSender::new();
        sender.expect_send().times(1).returning(|_| Ok(()));

        let report = ReminderService::new(Arc::new(store), Arc::new(sender))
            .send_due_reminders(date(2024, 3, 1))
            .await
            .unwrap();

        assert_eq!(
            report,
            ReminderReport {
                due_date: due,
                found: 3,
                sent: 1,
                skipped: 0,
                failed: 2,
                malformed: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_nothing_due() {
        let mut sender = MockPushSender::new();
        sender.expect_send().never();

        let report = ReminderService::new(Arc::new(InMemoryStore::new()), Arc::new(sender))
            .send_due_reminders(date(2024, 12, 31))
            .await
            .unwrap();

        assert_eq!(report.due_date, date(2025, 1, 1));
        assert_eq!(report.found, 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_error() {
        let mut sender = MockPushSender::new();
        sender.expect_send().never();

        let result = ReminderService::new(Arc::new(InMemoryStore::unavailable()), Arc::new(sender))
            .send_due_reminders(date(2024, 3, 1))
            .await;

        assert!(matches!(result, Err(ReminderError::Storage(_))));
    }
}
