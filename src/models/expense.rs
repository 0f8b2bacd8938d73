use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Timestamp layout of a ledger line, e.g. `02-01-2025 13:45`.
pub(crate) const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";
/// Date layout used for day files and date input, e.g. `02-01-2025`.
pub(crate) const DATE_FORMAT: &str = "%d-%m-%Y";

/// Field separator of the ledger line format.
pub(crate) const FIELD_SEPARATOR: char = '|';

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum RecordError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid timestamp '{0}'")]
    Timestamp(String),
    #[error("invalid amount '{0}'")]
    Amount(String),
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("budget cannot be negative")]
    NegativeBudget,
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("{0} may not contain '|' or line breaks")]
    ForbiddenCharacter(&'static str),
    #[error("malformed line: {0}")]
    Malformed(String),
}

/// One line of the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expense {
    pub(crate) timestamp: NaiveDateTime,
    pub(crate) amount: Decimal,
    pub(crate) category: String,
    pub(crate) description: String,
}

impl Expense {
    /// Validate and build a new record. Seconds are dropped so the record
    /// survives the minute-precision line format unchanged.
    pub(crate) fn new(
        timestamp: NaiveDateTime,
        amount: Decimal,
        category: &str,
        description: &str,
    ) -> Result<Self, RecordError> {
        if amount <= Decimal::ZERO {
            return Err(RecordError::NonPositiveAmount);
        }
        let category = validate_text("category", category)?;
        let description = validate_text("description", description)?;
        let timestamp = timestamp
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(timestamp);

        Ok(Self {
            timestamp,
            amount,
            category,
            description,
        })
    }

    /// Parse the four fields of a ledger line. Lenient on surrounding
    /// whitespace in the amount and thousands separators, nothing else.
    pub(crate) fn from_fields(fields: &[&str]) -> Result<Self, RecordError> {
        let [timestamp, amount, category, description] = fields else {
            return Err(RecordError::FieldCount(fields.len()));
        };

        let timestamp = NaiveDateTime::parse_from_str(timestamp.trim(), TIMESTAMP_FORMAT)
            .map_err(|_| RecordError::Timestamp(timestamp.to_string()))?;
        let amount = parse_amount(amount)?;

        Ok(Self {
            timestamp,
            amount,
            category: category.to_string(),
            description: description.to_string(),
        })
    }

    pub(crate) fn to_fields(&self) -> [String; 4] {
        [
            self.timestamp_str(),
            self.amount.to_string(),
            self.category.clone(),
            self.description.clone(),
        ]
    }

    pub(crate) fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub(crate) fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// True when the record falls in the same calendar month and year as `day`.
    pub(crate) fn in_month_of(&self, day: NaiveDate) -> bool {
        let date = self.date();
        date.year() == day.year() && date.month() == day.month()
    }
}

fn validate_text(field: &'static str, value: &str) -> Result<String, RecordError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordError::EmptyField(field));
    }
    if trimmed.contains([FIELD_SEPARATOR, '\n', '\r']) {
        return Err(RecordError::ForbiddenCharacter(field));
    }
    Ok(trimmed.to_string())
}

/// Parse a decimal amount, accepting thousands separators (`1,500.00`).
pub(crate) fn parse_amount(s: &str) -> Result<Decimal, RecordError> {
    let cleaned = s.trim().replace(',', "");
    Decimal::from_str(&cleaned).map_err(|_| RecordError::Amount(s.trim().to_string()))
}

/// Parse a `dd-MM-yyyy` date.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}
