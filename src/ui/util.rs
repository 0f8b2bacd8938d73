use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Budget;

/// Format an amount in rupees with Indian digit grouping and 2 decimal places.
/// e.g. `1234567.89` → `"INR 12,34,567.89"`
pub(crate) fn format_inr(val: Decimal) -> String {
    let abs = val
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    // Last three digits, then groups of two
    let grouped = if int_part.len() <= 3 {
        int_part.to_string()
    } else {
        let (head, tail) = int_part.split_at(int_part.len() - 3);
        let mut groups: Vec<&str> = head
            .as_bytes()
            .rchunks(2)
            .rev()
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
            .collect();
        groups.push(tail);
        groups.join(",")
    };

    if val < Decimal::ZERO && abs > Decimal::ZERO {
        format!("-INR {grouped}.{dec_part}")
    } else {
        format!("INR {grouped}.{dec_part}")
    }
}

/// The budget as shown to the user: formatted, or `Not Set`.
pub(crate) fn format_budget(budget: Budget) -> String {
    if budget.is_set() {
        format_inr(budget.amount())
    } else {
        "Not Set".to_string()
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        let page = page.max(1);
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page - 1);
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
