#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::util::*;
use crate::models::Budget;

// ── format_inr ────────────────────────────────────────────────

#[test]
fn test_format_inr_small() {
    assert_eq!(format_inr(dec!(0)), "INR 0.00");
    assert_eq!(format_inr(dec!(5)), "INR 5.00");
    assert_eq!(format_inr(dec!(999.5)), "INR 999.50");
}

#[test]
fn test_format_inr_indian_grouping() {
    assert_eq!(format_inr(dec!(1000)), "INR 1,000.00");
    assert_eq!(format_inr(dec!(12345)), "INR 12,345.00");
    assert_eq!(format_inr(dec!(123456)), "INR 1,23,456.00");
    assert_eq!(format_inr(dec!(1234567.89)), "INR 12,34,567.89");
    assert_eq!(format_inr(dec!(123456789)), "INR 12,34,56,789.00");
}

#[test]
fn test_format_inr_negative() {
    assert_eq!(format_inr(dec!(-1000)), "-INR 1,000.00");
    assert_eq!(format_inr(dec!(-0.5)), "-INR 0.50");
}

#[test]
fn test_format_inr_rounds_to_paise() {
    assert_eq!(format_inr(dec!(10.004)), "INR 10.00");
    assert_eq!(format_inr(dec!(10.005)), "INR 10.01");
    // Rounds to zero: no negative sign
    assert_eq!(format_inr(dec!(-0.001)), "INR 0.00");
}

#[test]
fn test_format_budget() {
    assert_eq!(format_budget(Budget::not_set()), "Not Set");
    assert_eq!(format_budget(Budget::new(Decimal::ZERO).unwrap()), "Not Set");
    assert_eq!(format_budget(Budget::new(dec!(25000)).unwrap()), "INR 25,000.00");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 5), "hello");
    assert_eq!(truncate("hello world", 5), "hell…");
    assert_eq!(truncate("hello", 0), "");
    assert_eq!(truncate("₹₹₹₹₹", 3), "₹₹…");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..4 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 4);
    assert_eq!(scroll, 2);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));

    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_edges() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (0, 0));
}
