use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, Screen};
use crate::ledger::Ledger;
use crate::models::parse_date;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Open the add form, or quick add (e.g. :add 120 lunch)",
        cmd_add,
        r
    );
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget 25000)",
        cmd_budget,
        r
    );
    register_command!("b", "Set monthly budget (e.g. :b 25000)", cmd_budget, r);
    register_command!(
        "filter",
        "Filter by date range (e.g. :filter 01-01-2025 31-01-2025)",
        cmd_filter,
        r
    );
    register_command!(
        "f",
        "Filter by date range (e.g. :f 01-01-2025 31-01-2025)",
        cmd_filter,
        r
    );
    register_command!("reset", "Clear the date filter", cmd_reset, r);
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!("clear-all", "Delete all expenses", cmd_clear_all, r);
    register_command!("refresh", "Reload the ledger from disk", cmd_refresh, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(ledger)
}

fn cmd_expenses(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh(ledger)
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

/// `:add` opens the form; `:add <amount> <description...>` submits straight
/// away with the form's current date and category.
fn cmd_add(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    if args.is_empty() {
        app.input_mode = InputMode::Form;
        return Ok(());
    }
    let mut parts = args.splitn(2, ' ');
    app.form.amount = parts.next().unwrap_or("").to_string();
    app.form.description = parts.next().unwrap_or("").trim().to_string();
    app.submit_form(ledger)
}

fn cmd_budget(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.set_budget(ledger, args)
}

fn cmd_filter(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    let dates: Vec<&str> = args.split_whitespace().collect();
    let [from, to] = dates.as_slice() else {
        app.set_status("Usage: :filter <from dd-MM-yyyy> <to dd-MM-yyyy>");
        return Ok(());
    };
    match (parse_date(from), parse_date(to)) {
        (Some(from), Some(to)) => {
            app.screen = Screen::Expenses;
            app.apply_filter(ledger, from, to)
        }
        _ => {
            app.set_status("Please select both dates! Use dd-MM-yyyy");
            Ok(())
        }
    }
}

fn cmd_reset(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.reset_filter(ledger)
}

fn cmd_delete(_args: &str, app: &mut App, _ledger: &Ledger) -> anyhow::Result<()> {
    app.request_delete_selected();
    Ok(())
}

fn cmd_clear_all(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.request_clear_all(ledger)
}

fn cmd_refresh(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.refresh(ledger)?;
    app.set_status(format!("Loaded {} expenses", app.expenses.len()));
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
