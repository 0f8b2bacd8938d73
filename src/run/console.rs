use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use std::io::{self, BufRead, Write};

use crate::ledger::Ledger;
use crate::models::{parse_amount, parse_date, summarize, Budget, Expense, Summary};
use crate::ui::util::{format_budget, format_inr};

const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

pub(crate) fn as_console(ledger: &Ledger) -> anyhow::Result<()> {
    tracing::info!(dir = %ledger.dir().display(), "console menu started");
    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(ledger, stdin.lock(), stdout.lock(), super::local_now).run()
}

/// The numbered menu. Reads one line per prompt from `input`.
pub(crate) struct Console<'a, R, W> {
    ledger: &'a Ledger,
    input: R,
    output: W,
    now: fn() -> NaiveDateTime,
}

type Action<'a, R, W> = fn(&mut Console<'a, R, W>) -> Result<()>;

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub(crate) fn new(ledger: &'a Ledger, input: R, output: W, now: fn() -> NaiveDateTime) -> Self {
        Self {
            ledger,
            input,
            output,
            now,
        }
    }

    /// Loop until the user picks Exit or input runs out. Operation errors are
    /// printed and the loop carries on; only a broken output stream ends it.
    pub(crate) fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };

            match choice.trim() {
                "1" => self.attempt("Error adding expense", Self::add_expense)?,
                "2" => self.attempt("Error reading expenses", Self::view_expenses)?,
                "3" => self.attempt("Error setting budget", Self::set_budget)?,
                "4" => self.attempt("Error viewing summary", Self::view_summary)?,
                "5" => self.attempt("Error deleting expenses", Self::delete_by_date)?,
                "6" => self.attempt("Error clearing expenses", Self::clear_all)?,
                "7" => self.clear_screen()?,
                "8" => {
                    writeln!(self.output, "Exiting... Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice! Please try again.")?,
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "========= EXPENSE TRACKER =========")?;
        writeln!(self.output, "1. Add Expense")?;
        writeln!(self.output, "2. View All Expenses")?;
        writeln!(self.output, "3. Set Monthly Budget")?;
        writeln!(self.output, "4. View Summary")?;
        writeln!(self.output, "5. Delete Expense by Date")?;
        writeln!(self.output, "6. Clear All Expenses")?;
        writeln!(self.output, "7. Clear Screen")?;
        writeln!(self.output, "8. Exit")?;
        write!(self.output, "Choose an option: ")?;
        self.output.flush()
    }

    fn attempt(&mut self, label: &str, action: Action<'a, R, W>) -> io::Result<()> {
        if let Err(e) = action(self) {
            tracing::warn!(error = %format!("{e:#}"), "{label}");
            writeln!(self.output, "{label}: {e:#}")?;
        }
        Ok(())
    }

    /// One line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn add_expense(&mut self) -> Result<()> {
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(());
        };
        let amount = parse_amount(&amount).map_err(|_| anyhow!("Invalid amount format!"))?;
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(());
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(());
        };

        let now = (self.now)();
        let expense = Expense::new(now, amount, &category, &description)?;
        self.ledger.append_record(now.date(), &expense)?;
        writeln!(self.output, "Expense added successfully!")?;

        let summary = self.summary()?;
        if summary.over_budget() {
            write_budget_alert(&mut self.output, &summary)?;
        }
        Ok(())
    }

    fn view_expenses(&mut self) -> Result<()> {
        let groups = self.ledger.grouped_by_day()?;
        if groups.is_empty() {
            writeln!(self.output, "No expenses found.")?;
            return Ok(());
        }
        for (file_name, records) in &groups {
            writeln!(self.output)?;
            writeln!(self.output, "📅 File: {file_name}")?;
            for record in records {
                write_expense_line(&mut self.output, record)?;
            }
        }
        Ok(())
    }

    fn set_budget(&mut self) -> Result<()> {
        let Some(value) = self.prompt("Enter monthly budget: ")? else {
            return Ok(());
        };
        let budget = Budget::parse(&value)?;
        self.ledger.set_budget(budget)?;
        writeln!(
            self.output,
            "Monthly budget set to {}",
            format_inr(budget.amount())
        )?;
        Ok(())
    }

    fn view_summary(&mut self) -> Result<()> {
        let summary = self.summary()?;
        write_summary(&mut self.output, &summary)?;
        Ok(())
    }

    fn delete_by_date(&mut self) -> Result<()> {
        let Some(input) = self.prompt("Enter date or filename (e.g., 30-10-2025.txt): ")? else {
            return Ok(());
        };
        let input = input.trim();
        let day = Ledger::parse_day_file_name(input)
            .or_else(|| parse_date(input))
            .ok_or_else(|| anyhow!("Invalid date '{input}'. Use dd-MM-yyyy"))?;

        if self.ledger.delete_day(day)? {
            writeln!(self.output, "File deleted successfully!")?;
        } else {
            writeln!(self.output, "File not found!")?;
        }
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        let Some(answer) =
            self.prompt("Are you sure you want to delete all expense files? (yes/no): ")?
        else {
            return Ok(());
        };
        if !answer.trim().eq_ignore_ascii_case("yes") {
            writeln!(self.output, "Cancelled.")?;
            return Ok(());
        }
        let removed = self.ledger.clear_all()?;
        writeln!(self.output, "All expenses cleared! ({removed} files removed)")?;
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        write!(self.output, "{CLEAR_SCREEN}")?;
        self.output.flush()
    }

    fn summary(&self) -> Result<Summary> {
        let records = self.ledger.list_all()?;
        let budget = self.ledger.get_budget()?;
        Ok(summarize(&records, budget, (self.now)().date()))
    }
}

pub(crate) fn write_expense_line<W: Write>(out: &mut W, record: &Expense) -> io::Result<()> {
    writeln!(
        out,
        "{} | {} | {} | {}",
        record.timestamp_str(),
        format_inr(record.amount),
        record.category,
        record.description
    )
}

pub(crate) fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    let remaining = if summary.budget.is_set() {
        format_inr(summary.remaining)
    } else {
        format!("{} (no budget set)", format_inr(summary.remaining))
    };

    writeln!(out)?;
    writeln!(out, "========= SUMMARY =========")?;
    writeln!(out, "Expenses Recorded: {}", summary.count)?;
    writeln!(out, "Total Expenses:    {}", format_inr(summary.total))?;
    writeln!(out, "This Month:        {}", format_inr(summary.monthly_total))?;
    writeln!(out, "Monthly Budget:    {}", format_budget(summary.budget))?;
    writeln!(out, "Remaining:         {remaining}")?;
    writeln!(
        out,
        "Top Category:      {}",
        summary.top_category.as_deref().unwrap_or("-")
    )?;
    if summary.over_budget() {
        write_budget_alert(out, summary)?;
    }
    Ok(())
}

pub(crate) fn write_budget_alert<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(
        out,
        "Budget Alert! Monthly expenses ({}) exceeded budget ({}). Over budget by: {}",
        format_inr(summary.monthly_total),
        format_inr(summary.budget.amount()),
        format_inr(summary.overspend())
    )
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
