#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%d-%m-%Y %H:%M").unwrap()
}

fn day(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn expense(ts: &str, amount: Decimal, category: &str, description: &str) -> Expense {
    Expense::new(at(ts), amount, category, description).unwrap()
}

fn setup() -> (tempfile::TempDir, Ledger) {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(dir.path());
    (dir, ledger)
}

fn add(ledger: &Ledger, e: &Expense) {
    ledger.append_record(e.date(), e).unwrap();
}

// ── File naming ───────────────────────────────────────────────

#[test]
fn test_day_file_name() {
    assert_eq!(Ledger::day_file_name(day("02-01-2025")), "02-01-2025.txt");
}

#[test]
fn test_parse_day_file_name() {
    assert_eq!(Ledger::parse_day_file_name("30-10-2025.txt"), Some(day("30-10-2025")));
    assert_eq!(
        Ledger::parse_day_file_name("expense_30-10-2025.txt"),
        Some(day("30-10-2025"))
    );
    assert_eq!(Ledger::parse_day_file_name("budget.txt"), None);
    assert_eq!(Ledger::parse_day_file_name("30-10-2025.csv"), None);
    assert_eq!(Ledger::parse_day_file_name("31-02-2025.txt"), None);
    assert_eq!(Ledger::parse_day_file_name(" 30-10-2025.txt"), None);
}

// ── Append / list ─────────────────────────────────────────────

#[test]
fn test_append_then_read_roundtrip() {
    let (_dir, ledger) = setup();
    let e = expense("02-01-2025 13:45", dec!(500.25), "Food & Dining", "lunch with \"team\"");
    add(&ledger, &e);

    let all = ledger.list_all().unwrap();
    assert_eq!(all, vec![e]);
}

#[test]
fn test_append_writes_line_format() {
    let (dir, ledger) = setup();
    add(&ledger, &expense("02-01-2025 13:45", dec!(500), "Food", "lunch"));
    add(&ledger, &expense("02-01-2025 19:00", dec!(120.50), "Transport", "cab home"));

    let contents = std::fs::read_to_string(dir.path().join("02-01-2025.txt")).unwrap();
    assert_eq!(
        contents,
        "02-01-2025 13:45|500|Food|lunch\n02-01-2025 19:00|120.50|Transport|cab home\n"
    );
}

#[test]
fn test_append_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(&dir.path().join("nested").join("data"));
    add(&ledger, &expense("02-01-2025 13:45", dec!(1), "Food", "x"));
    assert_eq!(ledger.list_all().unwrap().len(), 1);
}

#[test]
fn test_append_fails_when_directory_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("data");
    std::fs::write(&blocker, "not a directory").unwrap();
    let ledger = Ledger::open(&blocker);
    let e = expense("02-01-2025 13:45", dec!(1), "Food", "x");
    assert!(ledger.append_record(e.date(), &e).is_err());
}

#[test]
fn test_missing_directory_is_empty_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(&dir.path().join("nowhere"));
    assert!(ledger.list_all().unwrap().is_empty());
    assert!(ledger.day_files().unwrap().is_empty());
}

#[test]
fn test_list_is_ordered_by_day() {
    let (_dir, ledger) = setup();
    add(&ledger, &expense("15-01-2025 10:00", dec!(1500), "Rent", "rent"));
    add(&ledger, &expense("02-01-2025 10:00", dec!(500), "Food", "lunch"));
    add(&ledger, &expense("31-12-2024 10:00", dec!(50), "Gifts", "card"));

    let days: Vec<NaiveDate> = ledger.list_all().unwrap().iter().map(|e| e.date()).collect();
    assert_eq!(days, vec![day("31-12-2024"), day("02-01-2025"), day("15-01-2025")]);
}

#[test]
fn test_list_records_predicate() {
    let (_dir, ledger) = setup();
    add(&ledger, &expense("02-01-2025 10:00", dec!(500), "Food", "lunch"));
    add(&ledger, &expense("15-01-2025 10:00", dec!(1500), "Rent", "rent"));

    let food = ledger.list_records(|e| e.category == "Food").unwrap();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].amount, dec!(500));
}

#[test]
fn test_malformed_lines_are_skipped() {
    let (dir, ledger) = setup();
    std::fs::write(
        dir.path().join("02-01-2025.txt"),
        "02-01-2025 10:00|500|Food|lunch\n\
         only|three|fields\n\
         not a date|5|Food|x\n\
         02-01-2025 11:00|lots|Food|x\n\
         02-01-2025 12:00|1,250.00|Fuel|petrol\n",
    )
    .unwrap();

    let all = ledger.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].description, "lunch");
    assert_eq!(all[1].amount, dec!(1250));
}

#[test]
fn test_crlf_lines_are_read() {
    let (dir, ledger) = setup();
    std::fs::write(
        dir.path().join("02-01-2025.txt"),
        "02-01-2025 10:00|500|Food|lunch\r\n02-01-2025 11:00|20|Food|tea\r\n",
    )
    .unwrap();

    let all = ledger.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].description, "tea");
}

#[test]
fn test_non_day_files_are_ignored() {
    let (dir, ledger) = setup();
    add(&ledger, &expense("02-01-2025 10:00", dec!(500), "Food", "lunch"));
    ledger.set_budget(Budget::new(dec!(1000)).unwrap()).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "a|b|c|d\n").unwrap();

    assert_eq!(ledger.day_files().unwrap().len(), 1);
    assert_eq!(ledger.list_all().unwrap().len(), 1);
}

#[test]
fn test_legacy_day_files_are_read() {
    let (dir, ledger) = setup();
    std::fs::write(
        dir.path().join("expense_03-01-2025.txt"),
        "03-01-2025 09:00|75.0|Transport|bus\n",
    )
    .unwrap();

    let all = ledger.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, dec!(75));
}

#[test]
fn test_list_range_is_inclusive() {
    let (_dir, ledger) = setup();
    add(&ledger, &expense("01-01-2025 10:00", dec!(1), "Food", "a"));
    add(&ledger, &expense("02-01-2025 10:00", dec!(2), "Food", "b"));
    add(&ledger, &expense("03-01-2025 10:00", dec!(3), "Food", "c"));
    add(&ledger, &expense("04-01-2025 10:00", dec!(4), "Food", "d"));

    let found = ledger.list_range(day("02-01-2025"), day("03-01-2025")).unwrap();
    let amounts: Vec<Decimal> = found.iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![dec!(2), dec!(3)]);

    let single = ledger.list_range(day("04-01-2025"), day("04-01-2025")).unwrap();
    assert_eq!(single.len(), 1);
}

#[test]
fn test_list_range_rejects_reversed_dates() {
    let (_dir, ledger) = setup();
    assert!(ledger.list_range(day("05-01-2025"), day("01-01-2025")).is_err());
}

#[test]
fn test_grouped_by_day() {
    let (_dir, ledger) = setup();
    add(&ledger, &expense("02-01-2025 10:00", dec!(1), "Food", "a"));
    add(&ledger, &expense("02-01-2025 11:00", dec!(2), "Food", "b"));
    add(&ledger, &expense("05-01-2025 10:00", dec!(3), "Food", "c"));

    let groups = ledger.grouped_by_day().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "02-01-2025.txt");
    assert_eq!(groups[0].1.len(), 2);
    assert_eq!(groups[1].0, "05-01-2025.txt");
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_roundtrip() {
    let (_dir, ledger) = setup();
    ledger.set_budget(Budget::new(dec!(25000.50)).unwrap()).unwrap();
    assert_eq!(ledger.get_budget().unwrap().amount(), dec!(25000.50));

    // Overwritten wholesale
    ledger.set_budget(Budget::new(dec!(100)).unwrap()).unwrap();
    assert_eq!(ledger.get_budget().unwrap().amount(), dec!(100));
}

#[test]
fn test_budget_unset_reads_as_not_set() {
    let (_dir, ledger) = setup();
    let budget = ledger.get_budget().unwrap();
    assert!(!budget.is_set());
    assert_eq!(budget.amount(), Decimal::ZERO);
}

#[test]
fn test_budget_garbage_reads_as_not_set() {
    let (dir, ledger) = setup();
    std::fs::write(dir.path().join(BUDGET_FILE), "plenty\n").unwrap();
    assert!(!ledger.get_budget().unwrap().is_set());

    std::fs::write(dir.path().join(BUDGET_FILE), "").unwrap();
    assert!(!ledger.get_budget().unwrap().is_set());
}

#[test]
fn test_budget_reads_java_style_value() {
    let (dir, ledger) = setup();
    std::fs::write(dir.path().join(BUDGET_FILE), "1000.0").unwrap();
    assert_eq!(ledger.get_budget().unwrap().amount(), dec!(1000));
}

// ── Delete / clear / rewrite ──────────────────────────────────

#[test]
fn test_delete_day() {
    let (_dir, ledger) = setup();
    add(&ledger, &expense("02-01-2025 10:00", dec!(1), "Food", "a"));
    add(&ledger, &expense("03-01-2025 10:00", dec!(2), "Food", "b"));

    assert!(ledger.delete_day(day("02-01-2025")).unwrap());
    assert!(!ledger.delete_day(day("02-01-2025")).unwrap());

    let all = ledger.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "b");
}

#[test]
fn test_clear_all_keeps_budget() {
    let (_dir, ledger) = setup();
    add(&ledger, &expense("02-01-2025 10:00", dec!(1), "Food", "a"));
    add(&ledger, &expense("03-01-2025 10:00", dec!(2), "Food", "b"));
    ledger.set_budget(Budget::new(dec!(500)).unwrap()).unwrap();

    assert_eq!(ledger.clear_all().unwrap(), 2);
    assert!(ledger.list_all().unwrap().is_empty());
    assert_eq!(ledger.get_budget().unwrap().amount(), dec!(500));
}

#[test]
fn test_rewrite_groups_by_date() {
    let (dir, ledger) = setup();
    add(&ledger, &expense("09-09-2024 10:00", dec!(9), "Old", "gone"));

    let records = vec![
        expense("02-01-2025 10:00", dec!(1), "Food", "a"),
        expense("03-01-2025 10:00", dec!(2), "Food", "b"),
        expense("02-01-2025 12:00", dec!(3), "Food", "c"),
    ];
    ledger.rewrite(&records).unwrap();

    assert!(!dir.path().join("09-09-2024.txt").exists());
    let files = ledger.day_files().unwrap();
    assert_eq!(files.len(), 2);

    let all = ledger.list_all().unwrap();
    let descs: Vec<&str> = all.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descs, vec!["a", "c", "b"]);
}

#[test]
fn test_remove_record_keeps_others() {
    let (_dir, ledger) = setup();
    let a = expense("02-01-2025 10:00", dec!(1), "Food", "a");
    let b = expense("02-01-2025 11:00", dec!(2), "Food", "b");
    let c = expense("05-01-2025 10:00", dec!(3), "Rent", "c");
    for e in [&a, &b, &c] {
        add(&ledger, e);
    }

    assert!(ledger.remove_record(&b).unwrap());
    assert_eq!(ledger.list_all().unwrap(), vec![a, c]);
    assert!(!ledger.remove_record(&b).unwrap());
}

#[test]
fn test_remove_record_removes_only_one_duplicate() {
    let (_dir, ledger) = setup();
    let a = expense("02-01-2025 10:00", dec!(1), "Food", "same");
    add(&ledger, &a);
    add(&ledger, &a);

    assert!(ledger.remove_record(&a).unwrap());
    assert_eq!(ledger.list_all().unwrap().len(), 1);
}
