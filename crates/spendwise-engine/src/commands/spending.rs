use tracing::info;

use crate::EngineResult;
use crate::commands::common::{
    category_total_row, optional_window, rules_or_standard, scoped_rows, window_range,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategoryTotalRow, SpendingData};
use crate::insights::categorize::add_categories_with;
use crate::insights::policy::CATEGORIZATION_VERSION;
use crate::insights::rules::RuleTable;
use crate::insights::spending::{exclude_transfers, spending_by_category};
use crate::insights::types::Transaction;

#[derive(Debug, Default)]
pub struct SpendingRunOptions<'a> {
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
    run_with_options(SpendingRunOptions {
        transactions,
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        ..SpendingRunOptions::default()
    })
}

pub fn run_with_options(options: SpendingRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    let window = optional_window(options.from.as_deref(), options.to.as_deref(), "spending")?;
    let scoped = scoped_rows(options.transactions, window.as_ref());
    let mut categorized = add_categories_with(rules_or_standard(options.rules), &scoped);
    if options.exclude_transfers {
        categorized = exclude_transfers(&categorized);
    }

    let rows = spending_by_category(&categorized)
        .iter()
        .map(category_total_row)
        .collect::<Vec<CategoryTotalRow>>();
    info!(
        rows_in_scope = scoped.len(),
        categories = rows.len(),
        exclude_transfers = options.exclude_transfers,
        "computed spending by category"
    );

    let data = SpendingData {
        categorization_version: CATEGORIZATION_VERSION.to_string(),
        window: window.as_ref().map(window_range),
        exclude_transfers: options.exclude_transfers,
        rows,
    };
    success("spending", data)
}
