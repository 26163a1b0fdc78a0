//! Reminders for recurring transactions that fall due tomorrow.

pub mod service;

pub use service::{
    RECURRING_SCREEN, ReminderError, ReminderReport, ReminderService, reminder_notification,
};
