use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::insights::date::month_key;
use crate::insights::rules::Category;
use crate::insights::types::{CategoryDelta, CategoryTotal, Transaction};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodSummary {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

impl PeriodSummary {
    pub fn has_activity(&self) -> bool {
        self.income + self.expenses.abs() > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryChange {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionTotal {
    pub description: String,
    pub total: f64,
    pub count: usize,
}

/// Absolute expense totals per category, largest first.
///
/// Only rows with a negative amount and a category contribute. A feed with no
/// categorized rows or no amounts yields an empty result.
pub fn spending_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut sums: BTreeMap<Category, f64> = BTreeMap::new();
    for row in transactions {
        let (Some(amount), Some(category)) = (row.amount, row.category) else {
            continue;
        };
        if amount < 0.0 {
            *sums.entry(category).or_insert(0.0) += amount;
        }
    }

    let mut totals = sums
        .into_iter()
        .map(|(category, sum)| CategoryTotal {
            category,
            total: sum.abs(),
        })
        .collect::<Vec<CategoryTotal>>();
    totals.sort_by(|left, right| {
        right
            .total
            .total_cmp(&left.total)
            .then_with(|| left.category.as_str().cmp(right.category.as_str()))
    });
    totals
}

/// Outer-joins category spending of two windows; a side with no spending in
/// a category counts as 0. Sorted by delta, largest increase first.
pub fn category_deltas(current: &[Transaction], previous: &[Transaction]) -> Vec<CategoryDelta> {
    let current_totals = spending_by_category(current);
    let previous_totals = spending_by_category(previous);
    if current_totals.is_empty() && previous_totals.is_empty() {
        return Vec::new();
    }

    let mut joined: BTreeMap<Category, (f64, f64)> = BTreeMap::new();
    for total in &current_totals {
        joined.entry(total.category).or_insert((0.0, 0.0)).0 = total.total;
    }
    for total in &previous_totals {
        joined.entry(total.category).or_insert((0.0, 0.0)).1 = total.total;
    }

    let mut deltas = joined
        .into_iter()
        .map(|(category, (current, previous))| CategoryDelta {
            category,
            current,
            previous,
            delta: current - previous,
        })
        .collect::<Vec<CategoryDelta>>();
    deltas.sort_by(compare_deltas);
    deltas
}

/// Largest `limit` increases and the `limit` deepest decreases, both taken
/// from delta-ordered input, so the deepest decrease comes last.
pub fn top_movers(deltas: &[CategoryDelta], limit: usize) -> (Vec<CategoryDelta>, Vec<CategoryDelta>) {
    let mut ordered = deltas.to_vec();
    ordered.sort_by(compare_deltas);

    let increases = ordered
        .iter()
        .filter(|row| row.delta > 0.0)
        .take(limit)
        .cloned()
        .collect::<Vec<CategoryDelta>>();
    let decreases = ordered
        .iter()
        .filter(|row| row.delta < 0.0)
        .cloned()
        .collect::<Vec<CategoryDelta>>();
    let skip = decreases.len().saturating_sub(limit);
    (increases, decreases.into_iter().skip(skip).collect())
}

/// Drops rows categorized as `Transfer`, leaving spending between accounts
/// out of the totals.
pub fn exclude_transfers(transactions: &[Transaction]) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|row| row.category != Some(Category::Transfer))
        .cloned()
        .collect()
}

pub fn period_summary(transactions: &[Transaction]) -> PeriodSummary {
    let mut income = 0.0;
    let mut expenses = 0.0;
    for amount in transactions.iter().filter_map(|row| row.amount) {
        if amount > 0.0 {
            income += amount;
        } else {
            expenses += amount;
        }
    }
    PeriodSummary {
        income: round_to(income, 2),
        expenses: round_to(expenses, 2),
        net: round_to(income + expenses, 2),
    }
}

/// `None` when the previous period had no activity to compare against.
/// The expenses change compares absolute spending, so a positive value means
/// more was spent.
pub fn summary_change(current: &PeriodSummary, previous: &PeriodSummary) -> Option<SummaryChange> {
    if !previous.has_activity() {
        return None;
    }
    Some(SummaryChange {
        income: round_to(current.income - previous.income, 2),
        expenses: round_to(current.expenses.abs() - previous.expenses.abs(), 2),
        net: round_to(current.net - previous.net, 2),
    })
}

pub fn monthly_net(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for row in transactions {
        let (Some(date), Some(amount)) = (row.posted_on(), row.amount) else {
            continue;
        };
        *months.entry(month_key(&date)).or_insert(0.0) += amount;
    }
    months
        .into_iter()
        .map(|(month, total)| MonthlyTotal {
            month,
            total: round_to(total, 2),
        })
        .collect()
}

/// Per-description totals for one category, used to audit what lands in
/// `Transfer` or `Other`.
pub fn description_breakdown(
    transactions: &[Transaction],
    category: Category,
    limit: usize,
) -> Vec<DescriptionTotal> {
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in transactions {
        if row.category != Some(category) {
            continue;
        }
        let (Some(description), Some(amount)) = (row.description.as_ref(), row.amount) else {
            continue;
        };
        let entry = groups.entry(description.clone()).or_insert((0.0, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    let mut rows = groups
        .into_iter()
        .map(|(description, (sum, count))| DescriptionTotal {
            description,
            total: round_to(sum.abs(), 2),
            count,
        })
        .collect::<Vec<DescriptionTotal>>();
    rows.sort_by(|left, right| {
        right
            .total
            .total_cmp(&left.total)
            .then_with(|| left.description.cmp(&right.description))
    });
    rows.truncate(limit);
    rows
}

pub fn date_bounds(transactions: &[Transaction]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = transactions.iter().filter_map(Transaction::posted_on);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(low, high), date| {
        (low.min(date), high.max(date))
    }))
}

fn compare_deltas(left: &CategoryDelta, right: &CategoryDelta) -> Ordering {
    right
        .delta
        .total_cmp(&left.delta)
        .then_with(|| left.category.as_str().cmp(right.category.as_str()))
}

/// Rounds to `decimals` places with exact halves going to the even digit.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let exponent = i32::try_from(decimals).unwrap_or(2);
    let factor = 10_f64.powi(exponent);
    (value * factor).round_ties_even() / factor
}
