#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;

use super::*;

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 20)
        .unwrap()
        .and_hms_opt(18, 5, 0)
        .unwrap()
}

fn setup() -> (tempfile::TempDir, Ledger) {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(dir.path());
    (dir, ledger)
}

fn run(ledger: &Ledger, args: &[&str]) -> Result<String> {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let mut out = Vec::new();
    run_command(&args, ledger, &mut out, fixed_now)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_no_command_prints_usage() {
    let (_dir, ledger) = setup();
    let out = run(&ledger, &[]).unwrap();
    assert!(out.contains("Usage: expense-tracker"));
}

#[test]
fn test_unknown_command_errors() {
    let (_dir, ledger) = setup();
    let err = run(&ledger, &["frobnicate"]).unwrap_err();
    assert!(err.to_string().contains("Unknown command: frobnicate"));
}

#[test]
fn test_version() {
    let (_dir, ledger) = setup();
    let out = run(&ledger, &["--version"]).unwrap();
    assert!(out.starts_with("expense-tracker "));
}

#[test]
fn test_add_joins_description() {
    let (_dir, ledger) = setup();
    let out = run(&ledger, &["add", "250", "Food & Dining", "team", "lunch"]).unwrap();
    assert!(out.contains("Added INR 250.00 to Food & Dining on 20-01-2025"));

    let all = ledger.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "team lunch");
    assert_eq!(all[0].timestamp_str(), "20-01-2025 18:05");
}

#[test]
fn test_add_with_date_flag() {
    let (dir, ledger) = setup();
    run(&ledger, &["add", "500", "Food", "lunch", "--date", "02-01-2025"]).unwrap();
    assert!(dir.path().join("02-01-2025.txt").exists());
    assert_eq!(ledger.list_all().unwrap()[0].timestamp_str(), "02-01-2025 18:05");
}

#[test]
fn test_add_keeps_words_after_unknown_flags() {
    let (_dir, ledger) = setup();
    run(&ledger, &["add", "5", "Food", "--spicy", "chaat"]).unwrap();
    run(&ledger, &["add", "7", "Food", "--", "--date", "night"]).unwrap();

    let all = ledger.list_all().unwrap();
    assert_eq!(all[0].description, "--spicy chaat");
    assert_eq!(all[1].description, "--date night");
    assert_eq!(all[1].timestamp_str(), "20-01-2025 18:05");
}

#[test]
fn test_add_rejects_bad_input() {
    let (_dir, ledger) = setup();
    assert!(run(&ledger, &["add", "500", "Food"]).is_err());
    assert!(run(&ledger, &["add", "lots", "Food", "x"]).is_err());
    assert!(run(&ledger, &["add", "0", "Food", "x"]).is_err());
    assert!(run(&ledger, &["add", "5", "Food", "x", "--date", "2025-01-02"]).is_err());
    assert!(ledger.list_all().unwrap().is_empty());
}

#[test]
fn test_add_prints_budget_alert() {
    let (_dir, ledger) = setup();
    run(&ledger, &["budget", "100"]).unwrap();
    let out = run(&ledger, &["add", "150", "Fuel", "petrol"]).unwrap();
    assert!(out.contains("Budget Alert!"));
}

#[test]
fn test_list_with_range() {
    let (_dir, ledger) = setup();
    run(&ledger, &["add", "1", "Food", "a", "--date", "01-01-2025"]).unwrap();
    run(&ledger, &["add", "2", "Food", "b", "--date", "05-01-2025"]).unwrap();
    run(&ledger, &["add", "3", "Food", "c", "--date", "10-01-2025"]).unwrap();

    let out = run(&ledger, &["list", "--from", "02-01-2025", "--to", "10-01-2025"]).unwrap();
    assert!(!out.contains("| a"));
    assert!(out.contains("| b"));
    assert!(out.contains("| c"));
    assert!(out.contains("2 expenses, INR 5.00"));

    let out = run(&ledger, &["list", "--to", "01-01-2025"]).unwrap();
    assert!(out.contains("1 expenses, INR 1.00"));
}

#[test]
fn test_list_reversed_range_errors() {
    let (_dir, ledger) = setup();
    assert!(run(&ledger, &["list", "--from", "10-01-2025", "--to", "01-01-2025"]).is_err());
}

#[test]
fn test_list_empty() {
    let (_dir, ledger) = setup();
    let out = run(&ledger, &["list"]).unwrap();
    assert!(out.contains("No expenses found."));
}

#[test]
fn test_budget_show_and_set() {
    let (_dir, ledger) = setup();
    assert!(run(&ledger, &["budget"]).unwrap().contains("Not Set"));
    run(&ledger, &["budget", "25,000"]).unwrap();
    assert!(run(&ledger, &["budget"]).unwrap().contains("INR 25,000.00"));
    assert_eq!(ledger.get_budget().unwrap().amount(), dec!(25000));
    assert!(run(&ledger, &["budget", "-1"]).is_err());
}

#[test]
fn test_summary_example() {
    let (_dir, ledger) = setup();
    run(&ledger, &["add", "500", "Food", "lunch", "--date", "02-01-2025"]).unwrap();
    run(&ledger, &["add", "1500", "Rent", "rent", "--date", "15-01-2025"]).unwrap();
    run(&ledger, &["budget", "1000"]).unwrap();

    let out = run(&ledger, &["summary"]).unwrap();
    assert!(out.contains("Total Expenses:    INR 2,000.00"));
    assert!(out.contains("Remaining:         -INR 1,000.00"));
    assert!(out.contains("Top Category:      Rent"));
    assert!(out.contains("Budget Alert!"));
}

#[test]
fn test_delete_day() {
    let (_dir, ledger) = setup();
    run(&ledger, &["add", "1", "Food", "a", "--date", "01-01-2025"]).unwrap();
    let out = run(&ledger, &["delete", "01-01-2025"]).unwrap();
    assert!(out.contains("Deleted expenses for 01-01-2025"));
    let out = run(&ledger, &["delete", "01-01-2025.txt"]).unwrap();
    assert!(out.contains("No expenses recorded on 01-01-2025"));
    assert!(run(&ledger, &["delete", "someday"]).is_err());
}

#[test]
fn test_clear_requires_yes_flag() {
    let (_dir, ledger) = setup();
    run(&ledger, &["add", "1", "Food", "a"]).unwrap();
    assert!(run(&ledger, &["clear"]).is_err());
    assert_eq!(ledger.list_all().unwrap().len(), 1);

    let out = run(&ledger, &["clear", "--yes"]).unwrap();
    assert!(out.contains("1 files removed"));
    assert!(ledger.list_all().unwrap().is_empty());
}
