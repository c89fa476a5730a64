use std::ops::RangeInclusive;

use crate::insights::date::CadenceKind;

/// Rule-table and normalizer revision identifier.
///
/// Emitted with categorized output so consumers caching categories can tell
/// when a rule or normalization change invalidates them.
pub const CATEGORIZATION_VERSION: &str = "v2-transfer-reason";

/// Deterministic cadence-classification policy identifier.
pub const CADENCE_POLICY_VERSION: &str = "cadence/v1";

/// Word budgets for the three normalization pipelines.
#[derive(Debug, Clone, Copy)]
pub struct NormalizePolicy {
    /// Categorization keys keep this many trailing words.
    pub key_tail_words: usize,
    /// Transfer reasons keep this many trailing words.
    pub reason_tail_words: usize,
    /// Merchant labels keep this many leading words.
    pub merchant_head_words: usize,
}

pub const NORMALIZE_POLICY_V1: NormalizePolicy = NormalizePolicy {
    key_tail_words: 5,
    reason_tail_words: 3,
    merchant_head_words: 2,
};

/// v1 recurring-commitment policy.
///
/// Gap ranges are inclusive day counts. A group is classified by its
/// index-median gap and scored by the share of gaps inside the same range.
#[derive(Debug, Clone)]
pub struct CadencePolicy {
    pub min_occurrences: usize,
    pub weekly_gap_days: RangeInclusive<i64>,
    pub monthly_gap_days: RangeInclusive<i64>,
    pub confidence_decimals: u32,
}

impl CadencePolicy {
    pub fn gap_range(&self, cadence: CadenceKind) -> &RangeInclusive<i64> {
        match cadence {
            CadenceKind::Weekly => &self.weekly_gap_days,
            CadenceKind::Monthly => &self.monthly_gap_days,
        }
    }

    /// Weekly is checked first; the ranges do not overlap in v1.
    pub fn classify(&self, median_gap: i64) -> Option<CadenceKind> {
        [CadenceKind::Weekly, CadenceKind::Monthly]
            .into_iter()
            .find(|cadence| self.gap_range(*cadence).contains(&median_gap))
    }

    pub fn gap_matches(&self, cadence: CadenceKind, gap: i64) -> bool {
        self.gap_range(cadence).contains(&gap)
    }
}

pub const CADENCE_POLICY_V1: CadencePolicy = CadencePolicy {
    min_occurrences: 3,
    weekly_gap_days: 5..=9,
    monthly_gap_days: 25..=35,
    confidence_decimals: 2,
};
