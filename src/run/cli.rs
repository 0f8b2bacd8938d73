use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::io::{self, Write};

use super::console::{write_budget_alert, write_expense_line, write_summary};
use crate::ledger::Ledger;
use crate::models::{parse_amount, parse_date, summarize, Budget, Expense};
use crate::ui::util::{format_budget, format_inr};

pub(crate) fn as_cli(args: &[String], ledger: &Ledger) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&args[1..], ledger, &mut out, super::local_now)
}

/// Run one subcommand. `args` excludes the program name.
pub(crate) fn run_command<W: Write>(
    args: &[String],
    ledger: &Ledger,
    out: &mut W,
    now: fn() -> NaiveDateTime,
) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[1..];

    match command.as_str() {
        "add" | "a" => cli_add(rest, ledger, out, now),
        "list" | "ls" => cli_list(rest, ledger, out),
        "budget" | "b" => cli_budget(rest, ledger, out),
        "summary" | "s" => cli_summary(ledger, out, now),
        "delete" => cli_delete(rest, ledger, out),
        "clear" => cli_clear(rest, ledger, out),
        "--help" | "-h" | "help" => {
            print_usage(out)?;
            Ok(())
        }
        "--version" | "-V" | "version" => {
            writeln!(out, "expense-tracker {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Expense Tracker: local, flat-file expense tracking")?;
    writeln!(out)?;
    writeln!(out, "Usage: expense-tracker [--data-dir <path>] [command]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  (none), menu                  Launch the numbered console menu")?;
    writeln!(out, "  tui                           Launch the terminal dashboard")?;
    writeln!(out, "  add <amount> <category> <description...>")?;
    writeln!(out, "    --date <dd-MM-yyyy>         Day to record the expense on (default: today)")?;
    writeln!(out, "  list                          List expenses")?;
    writeln!(out, "    --from <dd-MM-yyyy>         First day to include")?;
    writeln!(out, "    --to <dd-MM-yyyy>           Last day to include")?;
    writeln!(out, "  budget [amount]               Show or set the monthly budget")?;
    writeln!(out, "  summary                       Print totals, budget remaining, top category")?;
    writeln!(out, "  delete <dd-MM-yyyy>           Delete every expense of one day")?;
    writeln!(out, "  clear --yes                   Delete all expenses (budget is kept)")?;
    writeln!(out, "  --help, -h                    Show this help")?;
    writeln!(out, "  --version, -V                 Show version")?;
    writeln!(out)?;
    writeln!(out, "The data directory can also be set with ${}.", crate::config::DATA_DIR_ENV)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let end = args.iter().position(|a| a == "--").unwrap_or(args.len());
    args[..end]
        .windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn flag_date(args: &[String], flag: &str) -> Result<Option<NaiveDate>> {
    flag_value(args, flag)
        .map(|v| parse_date(v).with_context(|| format!("Invalid {flag} date '{v}'. Use dd-MM-yyyy")))
        .transpose()
}

/// Flags that take a value as the following argument.
const VALUE_FLAGS: &[&str] = &["--date", "--from", "--to"];

/// Arguments with every known `--flag value` pair removed. Everything after a
/// bare `--` is positional.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            out.extend(iter.by_ref().map(String::as_str));
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn cli_add<W: Write>(
    args: &[String],
    ledger: &Ledger,
    out: &mut W,
    now: fn() -> NaiveDateTime,
) -> Result<()> {
    let positional = positional(args);
    let [amount, category, description @ ..] = positional.as_slice() else {
        anyhow::bail!("Usage: expense-tracker add <amount> <category> <description...> [--date dd-MM-yyyy]");
    };
    if description.is_empty() {
        anyhow::bail!("Please fill all fields! A description is required");
    }

    let amount = parse_amount(amount).context("Invalid amount format!")?;
    let now = now();
    let timestamp = match flag_date(args, "--date")? {
        Some(day) => day.and_time(now.time()),
        None => now,
    };

    let expense = Expense::new(timestamp, amount, category, &description.join(" "))?;
    ledger.append_record(expense.date(), &expense)?;
    writeln!(
        out,
        "Added {} to {} on {}",
        format_inr(expense.amount),
        expense.category,
        expense.date().format("%d-%m-%Y")
    )?;

    let summary = summarize(&ledger.list_all()?, ledger.get_budget()?, now.date());
    if summary.over_budget() {
        write_budget_alert(out, &summary)?;
    }
    Ok(())
}

fn cli_list<W: Write>(args: &[String], ledger: &Ledger, out: &mut W) -> Result<()> {
    let from = flag_date(args, "--from")?;
    let to = flag_date(args, "--to")?;

    let records = if from.is_some() || to.is_some() {
        ledger.list_range(
            from.unwrap_or(NaiveDate::MIN),
            to.unwrap_or(NaiveDate::MAX),
        )?
    } else {
        ledger.list_all()?
    };

    if records.is_empty() {
        writeln!(out, "No expenses found.")?;
        return Ok(());
    }
    for record in &records {
        write_expense_line(out, record)?;
    }
    writeln!(out, "{}", "─".repeat(40))?;
    let total: Decimal = records.iter().map(|r| r.amount).sum();
    writeln!(out, "{} expenses, {}", records.len(), format_inr(total))?;
    Ok(())
}

fn cli_budget<W: Write>(args: &[String], ledger: &Ledger, out: &mut W) -> Result<()> {
    match args.first() {
        None => {
            writeln!(out, "Monthly Budget: {}", format_budget(ledger.get_budget()?))?;
        }
        Some(value) => {
            let budget = Budget::parse(value)?;
            ledger.set_budget(budget)?;
            writeln!(out, "Monthly budget set to {}", format_inr(budget.amount()))?;
        }
    }
    Ok(())
}

fn cli_summary<W: Write>(ledger: &Ledger, out: &mut W, now: fn() -> NaiveDateTime) -> Result<()> {
    let summary = summarize(&ledger.list_all()?, ledger.get_budget()?, now().date());
    write_summary(out, &summary)?;
    Ok(())
}

fn cli_delete<W: Write>(args: &[String], ledger: &Ledger, out: &mut W) -> Result<()> {
    let Some(input) = args.first() else {
        anyhow::bail!("Usage: expense-tracker delete <dd-MM-yyyy>");
    };
    let day = Ledger::parse_day_file_name(input)
        .or_else(|| parse_date(input))
        .with_context(|| format!("Invalid date '{input}'. Use dd-MM-yyyy"))?;

    if ledger.delete_day(day)? {
        writeln!(out, "Deleted expenses for {}", day.format("%d-%m-%Y"))?;
    } else {
        writeln!(out, "No expenses recorded on {}", day.format("%d-%m-%Y"))?;
    }
    Ok(())
}

fn cli_clear<W: Write>(args: &[String], ledger: &Ledger, out: &mut W) -> Result<()> {
    if !args.iter().any(|a| a == "--yes") {
        anyhow::bail!("Refusing to delete all expenses without --yes");
    }
    let removed = ledger.clear_all()?;
    writeln!(out, "All expenses cleared! ({removed} files removed)")?;
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
