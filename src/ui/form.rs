use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::models::{parse_amount, parse_date, Expense, CATEGORIES, DATE_FORMAT};

/// Rows taken by the form panel: one per field plus borders.
pub(crate) const FORM_HEIGHT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Date,
    Amount,
    Category,
    Description,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Date, Self::Amount, Self::Category, Self::Description]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Amount => "Amount (INR)",
            Self::Category => "Category",
            Self::Description => "Description",
        }
    }

    pub(crate) fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub(crate) fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// The "add expense" form of the dashboard.
#[derive(Debug, Clone)]
pub(crate) struct ExpenseForm {
    pub(crate) date: String,
    pub(crate) amount: String,
    pub(crate) category_index: usize,
    pub(crate) description: String,
    pub(crate) focus: FormField,
}

impl ExpenseForm {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format(DATE_FORMAT).to_string(),
            amount: String::new(),
            category_index: 0,
            description: String::new(),
            focus: FormField::Amount,
        }
    }

    pub(crate) fn category(&self) -> &'static str {
        CATEGORIES
            .get(self.category_index)
            .copied()
            .unwrap_or("Other")
    }

    pub(crate) fn cycle_category(&mut self, delta: isize) {
        let len = CATEGORIES.len() as isize;
        let idx = (self.category_index as isize + delta).rem_euclid(len);
        self.category_index = idx as usize;
    }

    /// Text buffer of the focused field, `None` for the category picker.
    pub(crate) fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Date => Some(&mut self.date),
            FormField::Amount => Some(&mut self.amount),
            FormField::Description => Some(&mut self.description),
            FormField::Category => None,
        }
    }

    pub(crate) fn value(&self, field: FormField) -> String {
        match field {
            FormField::Date => self.date.clone(),
            FormField::Amount => self.amount.clone(),
            FormField::Category => self.category().to_string(),
            FormField::Description => self.description.clone(),
        }
    }

    /// Validate the form into a record timestamped at `time` on the chosen day.
    pub(crate) fn to_expense(&self, time: NaiveTime) -> Result<Expense> {
        if self.amount.trim().is_empty()
            || self.description.trim().is_empty()
            || self.date.trim().is_empty()
        {
            bail!("Please fill all fields!");
        }
        let Some(day) = parse_date(&self.date) else {
            bail!("Invalid date! Use dd-MM-yyyy");
        };
        let Ok(amount) = parse_amount(&self.amount) else {
            bail!("Invalid amount format!");
        };
        if amount <= Decimal::ZERO {
            bail!("Amount must be positive!");
        }
        Ok(Expense::new(
            day.and_time(time),
            amount,
            self.category(),
            &self.description,
        )?)
    }

    pub(crate) fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
