mod budget;
mod expense;
mod summary;

pub(crate) use budget::Budget;
pub(crate) use expense::{
    parse_amount, parse_date, Expense, RecordError, DATE_FORMAT, FIELD_SEPARATOR,
};
pub(crate) use summary::{summarize, BudgetHealth, Summary};

/// Categories offered by the dashboard form.
pub(crate) const CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transport",
    "Groceries",
    "Bills & Utilities",
    "Entertainment",
    "Healthcare",
    "Clothing",
    "Education",
    "Rent/EMI",
    "Mobile/Internet",
    "Fuel",
    "Gifts",
    "Investment",
    "Other",
];
