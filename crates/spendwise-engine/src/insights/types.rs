use chrono::NaiveDate;

use crate::insights::date::{parse_transaction_date, previous_window};
use crate::insights::rules::Category;

/// One row of the upstream transaction feed.
///
/// Every field is optional so a column missing from the upstream table can be
/// represented as `None` on every row. `category` is only populated by
/// [`crate::insights::categorize::add_categories`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    pub date: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub cumulative_balance: Option<f64>,
    pub category: Option<Category>,
}

impl Transaction {
    pub fn new(date: &str, amount: f64, description: &str, cumulative_balance: f64) -> Self {
        Self {
            date: Some(date.to_string()),
            amount: Some(amount),
            description: Some(description.to_string()),
            cumulative_balance: Some(cumulative_balance),
            category: None,
        }
    }

    pub fn posted_on(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_transaction_date)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.amount, Some(amount) if amount < 0.0)
    }

    pub fn abs_amount(&self) -> Option<f64> {
        self.amount.map(f64::abs)
    }
}

/// Inclusive date range used for period aggregation and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn length_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn previous(&self) -> Option<Window> {
        previous_window(self.start, self.end).map(|(start, end)| Window { start, end })
    }

    /// Rows whose parseable date falls inside the window, in feed order.
    pub fn select(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|row| row.posted_on().is_some_and(|date| self.contains(date)))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDelta {
    pub category: Category,
    pub current: f64,
    pub previous: f64,
    pub delta: f64,
}
