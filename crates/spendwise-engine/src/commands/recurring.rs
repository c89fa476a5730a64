use tracing::info;

use crate::EngineResult;
use crate::commands::common::{
    data_range_hint, optional_window, recurring_row, rules_or_standard, scoped_rows, window_range,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RecurringData, RecurringRow};
use crate::insights::categorize::add_categories_with;
use crate::insights::policy::CADENCE_POLICY_VERSION;
use crate::insights::recurring::detect_recurring_commitments;
use crate::insights::rules::RuleTable;
use crate::insights::spending::exclude_transfers;
use crate::insights::types::Transaction;

#[derive(Debug, Default)]
pub struct RecurringRunOptions<'a> {
    pub transactions: &'a [Transaction],
    pub from: Option<String>,
    pub to: Option<String>,
    pub exclude_transfers: bool,
    pub rules: Option<&'a RuleTable>,
}

pub fn run(
    transactions: &[Transaction],
    from: Option<&str>,
    to: Option<&str>,
) -> EngineResult<SuccessEnvelope> {
    run_with_options(RecurringRunOptions {
        transactions,
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        ..RecurringRunOptions::default()
    })
}

pub fn run_with_options(options: RecurringRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    let window = optional_window(options.from.as_deref(), options.to.as_deref(), "recurring")?;
    let mut scoped = scoped_rows(options.transactions, window.as_ref());
    if options.exclude_transfers {
        let categorized = add_categories_with(rules_or_standard(options.rules), &scoped);
        scoped = exclude_transfers(&categorized);
    }

    let rows = detect_recurring_commitments(&scoped)
        .iter()
        .map(recurring_row)
        .collect::<Vec<RecurringRow>>();
    info!(commitments = rows.len(), "detected recurring commitments");

    let data = RecurringData {
        policy_version: CADENCE_POLICY_VERSION.to_string(),
        window: window.as_ref().map(window_range),
        rows,
        data_range_hint: data_range_hint(options.transactions),
    };
    success("recurring", data)
}
