use tracing::info;

use crate::{EngineError, EngineResult};
use crate::commands::common::{
    DEFAULT_TOP_MOVERS_LIMIT, category_delta_row, category_total_row, data_range_hint,
    recurring_row, rules_or_standard, window_range,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategoryDeltaRow, InsightsData, MonthlyTotalRow, SummaryRow};
use crate::insights::categorize::add_categories_with;
use crate::insights::date::build_window;
use crate::insights::policy::{CADENCE_POLICY_VERSION, CATEGORIZATION_VERSION};
use crate::insights::recurring::detect_recurring_commitments;
use crate::insights::rules::RuleTable;
use crate::insights::spending::{
    PeriodSummary, category_deltas, exclude_transfers, monthly_net, period_summary,
    spending_by_category, summary_change, top_movers,
};
use crate::insights::types::{CategoryDelta, Transaction};

#[derive(Debug, Default)]
pub struct InsightsRunOptions<'a> {
    pub transactions: &'a [Transaction],
    pub from: String,
    pub to: String,
    pub exclude_transfers: bool,
    pub rules: Option<&'a RuleTable>,
    pub top_movers_limit: Option<usize>,
}

pub fn run(transactions: &[Transaction], from: &str, to: &str) -> EngineResult<SuccessEnvelope> {
    run_with_options(InsightsRunOptions {
        transactions,
        from: from.to_string(),
        to: to.to_string(),
        ..InsightsRunOptions::default()
    })
}

/// Full period report: the selected window against the equal-length window
/// before it.
///
/// Income/expense summaries always use every row in the window. Spending,
/// deltas and recurring detection use the transfer-filtered rows when
/// `exclude_transfers` is set.
pub fn run_with_options(options: InsightsRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    let window = build_window(&options.from, &options.to, "insights")?;
    let Some(previous) = window.previous() else {
        return Err(EngineError::invalid_argument_for_command(
            "Invalid date range: no earlier period of the same length exists before `from`.",
            Some("insights"),
        ));
    };
    let rules = rules_or_standard(options.rules);

    let current_rows = add_categories_with(rules, &window.select(options.transactions));
    let previous_rows = add_categories_with(rules, &previous.select(options.transactions));

    let summary = period_summary(&current_rows);
    let previous_summary = period_summary(&previous_rows);
    let change = summary_change(&summary, &previous_summary);

    let (current_insight, previous_insight) = if options.exclude_transfers {
        (exclude_transfers(&current_rows), exclude_transfers(&previous_rows))
    } else {
        (current_rows.clone(), previous_rows.clone())
    };

    let deltas = category_deltas(&current_insight, &previous_insight);
    let limit = options.top_movers_limit.unwrap_or(DEFAULT_TOP_MOVERS_LIMIT);
    let (increases, decreases) = top_movers(&deltas, limit);
    let recurring = detect_recurring_commitments(&current_insight);

    info!(
        from = %options.from,
        to = %options.to,
        rows = current_rows.len(),
        previous_rows = previous_rows.len(),
        recurring = recurring.len(),
        "built period insights"
    );

    let data = InsightsData {
        categorization_version: CATEGORIZATION_VERSION.to_string(),
        policy_version: CADENCE_POLICY_VERSION.to_string(),
        window: window_range(&window),
        previous_window: window_range(&previous),
        exclude_transfers: options.exclude_transfers,
        summary: summary_row(&summary),
        previous_summary: summary_row(&previous_summary),
        summary_change: change.map(|change| SummaryRow {
            income: change.income,
            expenses: change.expenses,
            net: change.net,
        }),
        monthly_net: monthly_net(&current_rows)
            .into_iter()
            .map(|month| MonthlyTotalRow {
                month: month.month,
                total: month.total,
            })
            .collect(),
        spending: spending_by_category(&current_insight)
            .iter()
            .map(category_total_row)
            .collect(),
        deltas: delta_rows(&deltas),
        top_increases: delta_rows(&increases),
        top_decreases: delta_rows(&decreases),
        recurring: recurring.iter().map(recurring_row).collect(),
        data_range_hint: data_range_hint(options.transactions),
    };
    success("insights", data)
}

fn summary_row(summary: &PeriodSummary) -> SummaryRow {
    SummaryRow {
        income: summary.income,
        expenses: summary.expenses,
        net: summary.net,
    }
}

fn delta_rows(deltas: &[CategoryDelta]) -> Vec<CategoryDeltaRow> {
    deltas.iter().map(category_delta_row).collect()
}
