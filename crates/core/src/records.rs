//! Typed records read from storage.
//!
//! Every record is built through a validating constructor, so a value that
//! exists is well formed. Storage adapters convert raw rows with these
//! constructors and reject anything that does not fit.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Reasons a raw row cannot become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required text field is empty or whitespace.
    #[error("{0} must not be blank")]
    Blank(&'static str),

    /// Budget month outside 1-12.
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(i32),

    /// Budget amount below zero.
    #[error("budget amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Transaction type string not recognised.
    #[error("unknown transaction type: {0:?}")]
    UnknownKind(String),
}

fn require(field: &'static str, value: String) -> Result<String, RecordError> {
    if value.trim().is_empty() {
        Err(RecordError::Blank(field))
    } else {
        Ok(value)
    }
}

/// Transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Money going out; counts toward budgets.
    Expense,
    /// Money coming in.
    Income,
}

impl TransactionKind {
    /// Canonical stored spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }

    /// Every spelling the mobile client is known to store for this kind.
    #[must_use]
    pub const fn stored_spellings(self) -> &'static [&'static str] {
        match self {
            Self::Expense => &["Expense", "Gasto"],
            Self::Income => &["Income", "Ingreso"],
        }
    }

    /// Lowercase label for user-facing text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [Self::Expense, Self::Income]
            .into_iter()
            .find(|kind| {
                kind.stored_spellings()
                    .iter()
                    .any(|spelling| spelling.eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| RecordError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TransactionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A monthly spending limit for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    user_id: String,
    category: String,
    amount: Decimal,
    month: u32,
    year: i32,
}

impl Budget {
    /// Creates a budget.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank user or category, a negative amount, or
    /// a month outside 1-12.
    pub fn new(
        user_id: impl Into<String>,
        category: impl Into<String>,
        amount: Decimal,
        month: i32,
        year: i32,
    ) -> Result<Self, RecordError> {
        if amount < Decimal::ZERO {
            return Err(RecordError::NegativeAmount(amount));
        }
        let month = u32::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or(RecordError::MonthOutOfRange(month))?;

        Ok(Self {
            user_id: require("user_id", user_id.into())?,
            category: require("category", category.into())?,
            amount,
            month,
            year,
        })
    }

    /// Owner of the budget.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Category, matched case-sensitively.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Spending limit for the month.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Budget month, 1-12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Budget year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }
}

/// A recorded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(skip)]
    user_id: String,
    description: String,
    amount: Decimal,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: String,
    transaction_date: NaiveDate,
}

impl Transaction {
    /// Creates a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the user id is blank.
    pub fn new(
        user_id: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        kind: TransactionKind,
        category: impl Into<String>,
        transaction_date: NaiveDate,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            user_id: require("user_id", user_id.into())?,
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            transaction_date,
        })
    }

    /// Owner of the transaction.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Expense or income.
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Date the transaction happened.
    #[must_use]
    pub const fn transaction_date(&self) -> NaiveDate {
        self.transaction_date
    }
}

/// A user's profile as far as notifications care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    user_id: String,
    push_token: Option<String>,
}

impl Profile {
    /// Creates a profile. A blank token is stored as no token.
    ///
    /// # Errors
    ///
    /// Returns an error if the user id is blank.
    pub fn new(user_id: impl Into<String>, push_token: Option<String>) -> Result<Self, RecordError> {
        Ok(Self {
            user_id: require("user_id", user_id.into())?,
            push_token: push_token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Profile id, equal to the user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Current device push token, if any.
    #[must_use]
    pub fn push_token(&self) -> Option<&str> {
        self.push_token.as_deref()
    }
}

/// A recurring transaction together with its owner's push token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringTransaction {
    user_id: String,
    description: String,
    kind: TransactionKind,
    next_due_date: NaiveDate,
    push_token: Option<String>,
}

impl RecurringTransaction {
    /// Creates a recurring transaction. A blank token is stored as no token.
    ///
    /// # Errors
    ///
    /// Returns an error if the user id is blank.
    pub fn new(
        user_id: impl Into<String>,
        description: impl Into<String>,
        kind: TransactionKind,
        next_due_date: NaiveDate,
        push_token: Option<String>,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            user_id: require("user_id", user_id.into())?,
            description: description.into(),
            kind,
            next_due_date,
            push_token: push_token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Owner.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Expense or income.
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Next date the transaction falls due.
    #[must_use]
    pub const fn next_due_date(&self) -> NaiveDate {
        self.next_due_date
    }

    /// Owner's push token, if any.
    #[must_use]
    pub fn push_token(&self) -> Option<&str> {
        self.push_token.as_deref()
    }

    /// Replaces the owner's push token. A blank token is stored as no token.
    #[must_use]
    pub fn with_push_token(mut self, push_token: Option<String>) -> Self {
        self.push_token = push_token.filter(|t| !t.trim().is_empty());
        self
    }
}
