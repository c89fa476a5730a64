use tracing::info;

use crate::EngineResult;
use crate::commands::common::{DEFAULT_BREAKDOWN_LIMIT, description_total_row, rules_or_standard};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategorizeData, CategorizedRow, DescriptionTotalRow};
use crate::insights::categorize::add_categories_with;
use crate::insights::policy::CATEGORIZATION_VERSION;
use crate::insights::rules::{Category, RuleTable};
use crate::insights::spending::description_breakdown;
use crate::insights::types::Transaction;

#[derive(Debug, Default)]
pub struct CategorizeRunOptions<'a> {
    pub transactions: &'a [Transaction],
    pub rules: Option<&'a RuleTable>,
    pub breakdown_limit: Option<usize>,
}

pub fn run(transactions: &[Transaction]) -> EngineResult<SuccessEnvelope> {
    run_with_options(CategorizeRunOptions {
        transactions,
        ..CategorizeRunOptions::default()
    })
}

pub fn run_with_options(options: CategorizeRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    let rules = rules_or_standard(options.rules);
    let categorized = add_categories_with(rules, options.transactions);
    let limit = options.breakdown_limit.unwrap_or(DEFAULT_BREAKDOWN_LIMIT);

    let rows = categorized
        .iter()
        .map(|row| CategorizedRow {
            date: row.date.clone(),
            amount: row.amount,
            description: row.description.clone(),
            cumulative_balance: row.cumulative_balance,
            category: row.category.unwrap_or(Category::Other).as_str().to_string(),
        })
        .collect::<Vec<CategorizedRow>>();

    let breakdown = |category: Category| {
        description_breakdown(&categorized, category, limit)
            .iter()
            .map(description_total_row)
            .collect::<Vec<DescriptionTotalRow>>()
    };
    let data = CategorizeData {
        categorization_version: CATEGORIZATION_VERSION.to_string(),
        transfer_breakdown: breakdown(Category::Transfer),
        other_breakdown: breakdown(Category::Other),
        rows,
    };

    info!(
        rows = data.rows.len(),
        uncategorized = data.other_breakdown.len(),
        "categorized transaction feed"
    );
    success("categorize", data)
}
