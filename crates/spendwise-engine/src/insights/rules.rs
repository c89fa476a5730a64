//! Ordered keyword rules mapping normalized descriptions to categories.
//!
//! Keywords are lowercase substrings and the first matching rule wins, so the
//! table is a `Vec` rather than a map: order is part of the contract.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Income,
    Groceries,
    Dining,
    Transport,
    Utilities,
    Subscriptions,
    Health,
    Shopping,
    Cash,
    Transfer,
    Insurance,
    Education,
    Other,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Self::Income,
        Self::Groceries,
        Self::Dining,
        Self::Transport,
        Self::Utilities,
        Self::Subscriptions,
        Self::Health,
        Self::Shopping,
        Self::Cash,
        Self::Transfer,
        Self::Insurance,
        Self::Education,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Groceries => "Groceries",
            Self::Dining => "Dining",
            Self::Transport => "Transport",
            Self::Utilities => "Utilities",
            Self::Subscriptions => "Subscriptions",
            Self::Health => "Health",
            Self::Shopping => "Shopping",
            Self::Cash => "Cash",
            Self::Transfer => "Transfer",
            Self::Insurance => "Insurance",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }

    /// Exact label match; anything else is rejected rather than becoming a
    /// new ad-hoc category.
    pub fn parse(label: &str) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub keyword: String,
    pub category: Category,
}

impl CategoryRule {
    pub fn new(keyword: &str, category: Category) -> Self {
        Self {
            keyword: keyword.to_string(),
            category,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RuleEntry {
    keyword: String,
    category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

impl RuleTable {
    /// Built-in table, built once and shared read-only for the process.
    pub fn standard() -> &'static RuleTable {
        static STANDARD: OnceLock<RuleTable> = OnceLock::new();
        STANDARD.get_or_init(|| RuleTable {
            rules: STANDARD_RULES
                .iter()
                .map(|(keyword, category)| CategoryRule::new(keyword, *category))
                .collect(),
        })
    }

    pub fn from_rules(rules: Vec<CategoryRule>) -> EngineResult<RuleTable> {
        for (index, rule) in rules.iter().enumerate() {
            validate_keyword(&rule.keyword, index)?;
        }
        Ok(RuleTable { rules })
    }

    /// Parses a JSON array of `{ "keyword": .., "category": .. }` objects.
    pub fn parse_json(content: &str) -> EngineResult<RuleTable> {
        let entries = serde_json::from_str::<Vec<RuleEntry>>(content).map_err(|error| {
            EngineError::invalid_rule(
                &format!("Rule file is not a JSON array of keyword/category objects: {error}"),
                None,
            )
        })?;

        let mut rules = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let Some(category) = Category::parse(entry.category.trim()) else {
                return Err(EngineError::invalid_rule(
                    &format!("Rule {index} uses unknown category `{}`.", entry.category),
                    Some(index),
                ));
            };
            rules.push(CategoryRule {
                keyword: entry.keyword,
                category,
            });
        }
        Self::from_rules(rules)
    }

    /// New table that checks `extra` before the rules already in `self`.
    pub fn with_priority_rules(&self, extra: RuleTable) -> RuleTable {
        let mut rules = extra.rules;
        rules.extend(self.rules.iter().cloned());
        RuleTable { rules }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule whose keyword is a substring of `text`.
    pub fn first_match(&self, text: &str) -> Option<Category> {
        self.rules
            .iter()
            .find(|rule| text.contains(rule.keyword.as_str()))
            .map(|rule| rule.category)
    }
}

fn validate_keyword(keyword: &str, index: usize) -> EngineResult<()> {
    if keyword.trim().is_empty() {
        return Err(EngineError::invalid_rule(
            &format!("Rule {index} has an empty keyword."),
            Some(index),
        ));
    }
    if keyword.to_lowercase() != keyword {
        return Err(EngineError::invalid_rule(
            &format!("Rule {index} keyword `{keyword}` must be lowercase."),
            Some(index),
        ));
    }
    Ok(())
}

const STANDARD_RULES: &[(&str, Category)] = &[
    ("payroll", Category::Income),
    ("salary", Category::Income),
    ("wages", Category::Income),
    ("woolworths", Category::Groceries),
    ("coles", Category::Groceries),
    ("aldi", Category::Groceries),
    ("iga", Category::Groceries),
    ("harris farm", Category::Groceries),
    ("mcdonald", Category::Dining),
    ("kfc", Category::Dining),
    ("subway", Category::Dining),
    ("domino", Category::Dining),
    ("hungry jack", Category::Dining),
    ("nandos", Category::Dining),
    ("uber eats", Category::Dining),
    ("menulog", Category::Dining),
    ("doordash", Category::Dining),
    ("mex fresh", Category::Dining),
    ("mad mex", Category::Dining),
    ("oporto", Category::Dining),
    ("opal", Category::Transport),
    ("uber", Category::Transport),
    ("taxi", Category::Transport),
    ("transportfornsw", Category::Transport),
    ("transport for nsw", Category::Transport),
    ("bp ", Category::Transport),
    ("shell", Category::Transport),
    ("caltex", Category::Transport),
    ("7-eleven", Category::Transport),
    ("electricity", Category::Utilities),
    ("energy", Category::Utilities),
    ("water", Category::Utilities),
    ("telstra", Category::Utilities),
    ("optus", Category::Utilities),
    ("vodafone", Category::Utilities),
    ("internet", Category::Utilities),
    ("netflix", Category::Subscriptions),
    ("spotify", Category::Subscriptions),
    ("youtube", Category::Subscriptions),
    ("disney", Category::Subscriptions),
    ("apple.com", Category::Subscriptions),
    ("microsoft", Category::Subscriptions),
    ("amazon prime", Category::Subscriptions),
    ("amznprime", Category::Subscriptions),
    ("chatgpt", Category::Subscriptions),
    ("openai", Category::Subscriptions),
    ("chemist", Category::Health),
    ("pharmacy", Category::Health),
    ("medicare", Category::Health),
    ("hospital", Category::Health),
    ("gym", Category::Health),
    ("fitness", Category::Health),
    ("anytime fitness", Category::Health),
    ("barber", Category::Health),
    ("amazon", Category::Shopping),
    ("ebay", Category::Shopping),
    ("kmart", Category::Shopping),
    ("target", Category::Shopping),
    ("big w", Category::Shopping),
    ("myer", Category::Shopping),
    ("david jones", Category::Shopping),
    ("afterpay", Category::Shopping),
    ("jb hi fi", Category::Shopping),
    ("jb hifi", Category::Shopping),
    ("atm", Category::Cash),
    // label only; transfer detection goes through `is_transfer`
    ("transfer", Category::Transfer),
    ("insurance", Category::Insurance),
    ("university", Category::Education),
    ("tafe", Category::Education),
    ("rent", Category::Utilities),
    ("groceries", Category::Groceries),
    ("nails", Category::Health),
    ("savings", Category::Transfer),
];

#[cfg(test)]
mod tests {
    use super::{Category, CategoryRule, RuleTable};

    #[test]
    fn standard_table_preserves_declaration_order() {
        let table = RuleTable::standard();
        assert_eq!(table.rules()[0].keyword, "payroll");
        assert_eq!(table.rules()[table.len() - 1].keyword, "savings");
    }

    #[test]
    fn first_match_uses_table_order_as_tie_break() {
        // "amazon prime" is listed before "amazon"
        let table = RuleTable::standard();
        assert_eq!(
            table.first_match("amazon prime video"),
            Some(Category::Subscriptions)
        );
        assert_eq!(table.first_match("amazon marketplace"), Some(Category::Shopping));
        // "uber eats" is listed before "uber"
        assert_eq!(table.first_match("uber eats sydney"), Some(Category::Dining));
        assert_eq!(table.first_match("uber trip"), Some(Category::Transport));
    }

    #[test]
    fn category_labels_round_trip_through_parse() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("groceries"), None);
        assert_eq!(Category::parse("Housing"), None);
    }

    #[test]
    fn parse_json_rejects_unknown_categories() {
        let result = RuleTable::parse_json(r#"[{"keyword": "rent", "category": "Housing"}]"#);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_rule");
            assert!(error.message.contains("Housing"));
        }
    }

    #[test]
    fn from_rules_rejects_uppercase_and_empty_keywords() {
        assert!(RuleTable::from_rules(vec![CategoryRule::new("NETFLIX", Category::Subscriptions)]).is_err());
        assert!(RuleTable::from_rules(vec![CategoryRule::new("  ", Category::Other)]).is_err());
    }

    #[test]
    fn priority_rules_are_checked_before_builtins() {
        let extra = RuleTable::parse_json(r#"[{"keyword": "rent", "category": "Transfer"}]"#);
        assert!(extra.is_ok());
        if let Ok(extra) = extra {
            let table = RuleTable::standard().with_priority_rules(extra);
            assert_eq!(table.len(), RuleTable::standard().len() + 1);
            assert_eq!(table.first_match("rent"), Some(Category::Transfer));
        }
    }
}
