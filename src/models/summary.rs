use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Budget, Expense};

/// How the month is tracking against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BudgetHealth {
    NotSet,
    Healthy,
    /// Less than a fifth of the budget left.
    Low,
    Over,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) total: Decimal,
    pub(crate) monthly_total: Decimal,
    pub(crate) budget: Budget,
    /// Budget minus the monthly total. May be negative.
    pub(crate) remaining: Decimal,
    /// Per-category sums in order of first appearance.
    pub(crate) by_category: Vec<(String, Decimal)>,
    pub(crate) top_category: Option<String>,
    pub(crate) count: usize,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            total: Decimal::ZERO,
            monthly_total: Decimal::ZERO,
            budget: Budget::not_set(),
            remaining: Decimal::ZERO,
            by_category: Vec::new(),
            top_category: None,
            count: 0,
        }
    }
}

impl Summary {
    pub(crate) fn over_budget(&self) -> bool {
        self.budget.is_set() && self.monthly_total > self.budget.amount()
    }

    /// Amount by which the monthly total exceeds the budget, zero otherwise.
    pub(crate) fn overspend(&self) -> Decimal {
        if self.over_budget() {
            self.monthly_total - self.budget.amount()
        } else {
            Decimal::ZERO
        }
    }

    pub(crate) fn budget_health(&self) -> BudgetHealth {
        if !self.budget.is_set() {
            return BudgetHealth::NotSet;
        }
        let low_mark = self.budget.amount() * Decimal::new(2, 1);
        if self.remaining < Decimal::ZERO {
            BudgetHealth::Over
        } else if self.remaining < low_mark {
            BudgetHealth::Low
        } else {
            BudgetHealth::Healthy
        }
    }
}

/// Aggregate `records` against `budget`, with "this month" taken from `today`.
pub(crate) fn summarize(records: &[Expense], budget: Budget, today: NaiveDate) -> Summary {
    let mut total = Decimal::ZERO;
    let mut monthly_total = Decimal::ZERO;
    let mut by_category: Vec<(String, Decimal)> = Vec::new();

    for record in records {
        total += record.amount;
        if record.in_month_of(today) {
            monthly_total += record.amount;
        }
        match by_category.iter_mut().find(|(name, _)| *name == record.category) {
            Some((_, sum)) => *sum += record.amount,
            None => by_category.push((record.category.clone(), record.amount)),
        }
    }

    // Strictly greater: on a tie the category seen first wins.
    let mut top: Option<&(String, Decimal)> = None;
    for entry in &by_category {
        let better = match top {
            Some((_, best)) => entry.1 > *best,
            None => true,
        };
        if better {
            top = Some(entry);
        }
    }
    let top_category = top.map(|(name, _)| name.clone());

    Summary {
        total,
        monthly_total,
        budget,
        remaining: budget.amount() - monthly_total,
        by_category,
        top_category,
        count: records.len(),
    }
}
