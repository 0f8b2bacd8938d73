use rust_decimal::Decimal;

use super::expense::{parse_amount, RecordError};

/// The active monthly budget. A budget of zero counts as not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Budget {
    limit: Option<Decimal>,
}

impl Budget {
    pub(crate) fn not_set() -> Self {
        Self { limit: None }
    }

    pub(crate) fn new(limit: Decimal) -> Result<Self, RecordError> {
        if limit < Decimal::ZERO {
            return Err(RecordError::NegativeBudget);
        }
        Ok(Self { limit: Some(limit) })
    }

    /// Parse the contents of the budget file or a user-entered value.
    pub(crate) fn parse(s: &str) -> Result<Self, RecordError> {
        Self::new(parse_amount(s)?)
    }

    pub(crate) fn is_set(&self) -> bool {
        self.limit.is_some_and(|l| l > Decimal::ZERO)
    }

    /// The limit used in arithmetic; an unset budget is zero.
    pub(crate) fn amount(&self) -> Decimal {
        self.limit.unwrap_or(Decimal::ZERO)
    }

    /// Exact value as stored on disk, `None` when nothing was ever set.
    pub(crate) fn limit(&self) -> Option<Decimal> {
        self.limit
    }
}
