use std::sync::OnceLock;

use regex::Regex;

use crate::insights::normalize::{categorization_key, transfer_reason};
use crate::insights::rules::{Category, RuleTable};
use crate::insights::types::Transaction;

/// True only when the description contains the whole word "transfer".
pub fn is_transfer(description: &str) -> bool {
    transfer_word_regex().is_match(description)
}

pub fn categorize(description: Option<&str>) -> Category {
    categorize_with(RuleTable::standard(), description)
}

/// Transfers are matched on their extracted reason only and fall back to
/// `Transfer`; everything else is matched on the cleaned key, then on the raw
/// lowercased description, then falls back to `Other`.
pub fn categorize_with(rules: &RuleTable, description: Option<&str>) -> Category {
    let Some(description) = description.filter(|value| !value.is_empty()) else {
        return Category::Other;
    };

    if is_transfer(description) {
        let reason = transfer_reason(description);
        if reason.is_empty() {
            return Category::Transfer;
        }
        return rules.first_match(&reason).unwrap_or(Category::Transfer);
    }

    let key = categorization_key(description);
    if !key.is_empty()
        && let Some(category) = rules.first_match(&key)
    {
        return category;
    }

    rules
        .first_match(&description.to_lowercase())
        .unwrap_or(Category::Other)
}

/// Returns a copy of `transactions` with `category` derived from `description`.
/// Row order is preserved and any existing category is overwritten.
pub fn add_categories(transactions: &[Transaction]) -> Vec<Transaction> {
    add_categories_with(RuleTable::standard(), transactions)
}

pub fn add_categories_with(rules: &RuleTable, transactions: &[Transaction]) -> Vec<Transaction> {
    transactions
        .iter()
        .map(|row| Transaction {
            category: Some(categorize_with(rules, row.description.as_deref())),
            ..row.clone()
        })
        .collect()
}

fn transfer_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\btransfer\b").expect("invalid transfer word regex"))
}
