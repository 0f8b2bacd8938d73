use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use super::form::{ExpenseForm, FORM_HEIGHT};
use super::util::format_inr;
use crate::ledger::Ledger;
use crate::models::{summarize, Budget, Expense, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "ADD"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense(Expense),
    ClearAll,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) now: fn() -> NaiveDateTime,

    // Rows currently shown, and the totals computed from them
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) filter: Option<(NaiveDate, NaiveDate)>,
    pub(crate) budget: Budget,
    pub(crate) summary: Summary,

    pub(crate) form: ExpenseForm,

    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(now: fn() -> NaiveDateTime) -> Self {
        let today = now().date();
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            now,

            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,
            filter: None,
            budget: Budget::not_set(),
            summary: Summary::default(),

            form: ExpenseForm::new(today),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        (self.now)().date()
    }

    /// Reload rows (respecting the date filter), budget and totals.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) -> Result<()> {
        self.expenses = match self.filter {
            Some((from, to)) => ledger.list_range(from, to)?,
            None => ledger.list_all()?,
        };
        self.budget = ledger.get_budget()?;
        self.summary = summarize(&self.expenses, self.budget, self.today());
        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
        Ok(())
    }

    /// Table rows visible on the expenses screen, below the form panel.
    pub(crate) fn expense_page(&self) -> usize {
        self.visible_rows
            .saturating_sub(FORM_HEIGHT as usize + 3)
            .max(1)
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    /// Validate the form, append the record and report the outcome.
    pub(crate) fn submit_form(&mut self, ledger: &Ledger) -> Result<()> {
        let expense = match self.form.to_expense((self.now)().time()) {
            Ok(e) => e,
            Err(e) => {
                self.set_status(e.to_string());
                return Ok(());
            }
        };
        ledger.append_record(expense.date(), &expense)?;
        // A new row hidden by the date filter would look like a lost add
        if let Some((from, to)) = self.filter {
            if !(from..=to).contains(&expense.date()) {
                self.filter = None;
            }
        }
        self.refresh(ledger)?;
        self.form.reset(self.today());
        self.input_mode = InputMode::Normal;

        // The alert covers the whole month, whatever the filter shows
        let month = summarize(&ledger.list_all()?, self.budget, self.today());
        if month.over_budget() {
            self.set_status(format!(
                "Budget Alert! Monthly expenses ({}) exceeded budget ({}). Over budget by: {}",
                format_inr(month.monthly_total),
                format_inr(self.budget.amount()),
                format_inr(month.overspend())
            ));
        } else {
            self.set_status(format!(
                "Expense added successfully! Amount: {}",
                format_inr(expense.amount)
            ));
        }
        Ok(())
    }

    pub(crate) fn set_budget(&mut self, ledger: &Ledger, input: &str) -> Result<()> {
        if input.trim().is_empty() {
            self.set_status("Usage: :budget <amount>");
            return Ok(());
        }
        let budget = match Budget::parse(input) {
            Ok(b) => b,
            Err(crate::models::RecordError::NegativeBudget) => {
                self.set_status("Budget cannot be negative!");
                return Ok(());
            }
            Err(_) => {
                self.set_status("Invalid amount format!");
                return Ok(());
            }
        };
        ledger.set_budget(budget)?;
        self.refresh(ledger)?;
        self.set_status(format!(
            "Monthly budget set to {}",
            format_inr(budget.amount())
        ));
        Ok(())
    }

    pub(crate) fn apply_filter(&mut self, ledger: &Ledger, from: NaiveDate, to: NaiveDate) -> Result<()> {
        if from > to {
            self.set_status("'From' date must be before 'To' date!");
            return Ok(());
        }
        self.filter = Some((from, to));
        self.expense_index = 0;
        self.expense_scroll = 0;
        self.refresh(ledger)?;
        self.set_status(format!("{} expenses found in date range", self.expenses.len()));
        Ok(())
    }

    pub(crate) fn reset_filter(&mut self, ledger: &Ledger) -> Result<()> {
        self.filter = None;
        self.refresh(ledger)?;
        self.set_status("Filter cleared");
        Ok(())
    }

    pub(crate) fn request_delete_selected(&mut self) {
        match self.selected_expense().cloned() {
            Some(expense) => {
                self.confirm_message = format!(
                    "Delete {} {} ({})?",
                    expense.timestamp_str(),
                    format_inr(expense.amount),
                    expense.description
                );
                self.pending_action = Some(PendingAction::DeleteExpense(expense));
                self.input_mode = InputMode::Confirm;
            }
            None => self.set_status("Please select an expense to delete!"),
        }
    }

    /// Clearing removes the whole ledger, so emptiness is checked there
    /// rather than on the filtered rows.
    pub(crate) fn request_clear_all(&mut self, ledger: &Ledger) -> Result<()> {
        if ledger.day_files()?.is_empty() {
            self.set_status("No expenses to clear!");
            return Ok(());
        }
        self.confirm_message = "Delete all expenses?".into();
        self.pending_action = Some(PendingAction::ClearAll);
        self.input_mode = InputMode::Confirm;
        Ok(())
    }

    /// Carry out the pending action after the user confirmed it.
    pub(crate) fn confirm(&mut self, ledger: &Ledger) -> Result<()> {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteExpense(expense) => {
                    if ledger.remove_record(&expense)? {
                        self.set_status("Expense deleted successfully!");
                    } else {
                        self.set_status("Expense no longer in the ledger");
                    }
                }
                PendingAction::ClearAll => {
                    ledger.clear_all()?;
                    self.set_status("All expenses cleared successfully!");
                }
            }
            self.refresh(ledger)?;
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        Ok(())
    }

    pub(crate) fn cancel(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    /// Show a failed operation in the status bar. The dashboard keeps running.
    pub(crate) fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %format!("{e:#}"), "dashboard operation failed");
            self.pending_action = None;
            self.confirm_message.clear();
            if self.input_mode == InputMode::Confirm {
                self.input_mode = InputMode::Normal;
            }
            self.set_status(format!("Error: {e:#}"));
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
