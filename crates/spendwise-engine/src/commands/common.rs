use crate::contracts::types::{
    CategoryDeltaRow, CategoryTotalRow, DataRangeHint, DescriptionTotalRow, RecurringRow,
    WindowRange,
};
use crate::insights::date::{build_window, format_iso_date};
use crate::insights::recurring::RecurringCommitment;
use crate::insights::rules::RuleTable;
use crate::insights::spending::{DescriptionTotal, date_bounds};
use crate::insights::types::{CategoryDelta, CategoryTotal, Transaction, Window};
use crate::{EngineError, EngineResult};

pub(crate) const DEFAULT_BREAKDOWN_LIMIT: usize = 30;
pub(crate) const DEFAULT_TOP_MOVERS_LIMIT: usize = 5;

/// Both bounds or neither; a half-open window is rejected.
pub(crate) fn optional_window(
    from: Option<&str>,
    to: Option<&str>,
    command: &str,
) -> EngineResult<Option<Window>> {
    match (from, to) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => build_window(start, end, command).map(Some),
        _ => Err(EngineError::invalid_argument_for_command(
            "`from` and `to` must be provided together.",
            Some(command),
        )),
    }
}

pub(crate) fn scoped_rows(transactions: &[Transaction], window: Option<&Window>) -> Vec<Transaction> {
    match window {
        Some(window) => window.select(transactions),
        None => transactions.to_vec(),
    }
}

pub(crate) fn rules_or_standard(rules: Option<&RuleTable>) -> &RuleTable {
    match rules {
        Some(rules) => rules,
        None => RuleTable::standard(),
    }
}

pub fn window_range(window: &Window) -> WindowRange {
    WindowRange {
        from: format_iso_date(&window.start),
        to: format_iso_date(&window.end),
    }
}

pub fn data_range_hint(transactions: &[Transaction]) -> DataRangeHint {
    let bounds = date_bounds(transactions);
    DataRangeHint {
        earliest: bounds.map(|(first, _)| format_iso_date(&first)),
        latest: bounds.map(|(_, last)| format_iso_date(&last)),
    }
}

pub fn category_total_row(total: &CategoryTotal) -> CategoryTotalRow {
    CategoryTotalRow {
        category: total.category.as_str().to_string(),
        total: total.total,
    }
}

pub fn category_delta_row(delta: &CategoryDelta) -> CategoryDeltaRow {
    CategoryDeltaRow {
        category: delta.category.as_str().to_string(),
        current: delta.current,
        previous: delta.previous,
        delta: delta.delta,
    }
}

pub fn recurring_row(commitment: &RecurringCommitment) -> RecurringRow {
    RecurringRow {
        merchant: commitment.merchant.clone(),
        cadence: commitment.cadence.as_str().to_string(),
        median_amount: commitment.median_amount,
        last_seen: format_iso_date(&commitment.last_seen),
        occurrences: i64::try_from(commitment.occurrences).unwrap_or(i64::MAX),
        confidence: commitment.confidence,
    }
}

pub fn description_total_row(total: &DescriptionTotal) -> DescriptionTotalRow {
    DescriptionTotalRow {
        description: total.description.clone(),
        total: total.total,
        count: i64::try_from(total.count).unwrap_or(i64::MAX),
    }
}
