use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::insights::date::CadenceKind;
use crate::insights::normalize::normalize_merchant;
use crate::insights::policy::{CADENCE_POLICY_V1, CadencePolicy};
use crate::insights::spending::round_to;
use crate::insights::types::Transaction;

#[derive(Debug, Clone, PartialEq)]
pub struct RecurringCommitment {
    pub merchant: String,
    pub cadence: CadenceKind,
    pub median_amount: f64,
    pub last_seen: NaiveDate,
    pub occurrences: usize,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy)]
struct Occurrence {
    posted_on: NaiveDate,
    abs_amount: f64,
}

pub fn detect_recurring_commitments(transactions: &[Transaction]) -> Vec<RecurringCommitment> {
    detect_recurring_commitments_with_policy(transactions, &CADENCE_POLICY_V1)
}

pub fn detect_recurring_commitments_with_policy(
    transactions: &[Transaction],
    policy: &CadencePolicy,
) -> Vec<RecurringCommitment> {
    // a feed without descriptions has no merchants to group
    if transactions.iter().all(|row| row.description.is_none()) {
        debug!(rows = transactions.len(), "no descriptions in feed, skipping cadence detection");
        return Vec::new();
    }

    let mut groups: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();
    for transaction in transactions {
        if !transaction.is_expense() {
            continue;
        }
        let (Some(posted_on), Some(abs_amount)) =
            (transaction.posted_on(), transaction.abs_amount())
        else {
            continue;
        };
        let merchant = normalize_merchant(transaction.description.as_deref().unwrap_or(""));
        groups.entry(merchant).or_default().push(Occurrence {
            posted_on,
            abs_amount,
        });
    }

    let mut commitments: Vec<RecurringCommitment> = Vec::new();
    for (merchant, mut rows) in groups {
        if rows.len() < policy.min_occurrences {
            debug!(merchant = %merchant, occurrences = rows.len(), "too few occurrences for cadence");
            continue;
        }
        rows.sort_by_key(|row| row.posted_on);

        let gaps = day_gaps(&rows);
        let Some(median_gap) = index_median_i64(&gaps) else {
            continue;
        };
        let Some(cadence) = policy.classify(median_gap) else {
            debug!(merchant = %merchant, median_gap, "median gap matches no cadence");
            continue;
        };

        let in_range = gaps
            .iter()
            .filter(|gap| policy.gap_matches(cadence, **gap))
            .count();
        let confidence = (in_range as f64) / (gaps.len() as f64);

        let mut amounts = rows.iter().map(|row| row.abs_amount).collect::<Vec<f64>>();
        amounts.sort_by(|left, right| left.total_cmp(right));
        let median_amount = median_f64(&amounts).unwrap_or(0.0);

        let last_seen = rows[rows.len() - 1].posted_on;
        commitments.push(RecurringCommitment {
            merchant,
            cadence,
            median_amount: round_to(median_amount, 2),
            last_seen,
            occurrences: rows.len(),
            confidence: round_to(confidence, policy.confidence_decimals),
        });
    }

    commitments.sort_by(compare_commitments);
    debug!(commitments = commitments.len(), "recurring detection finished");
    commitments
}

fn day_gaps(rows: &[Occurrence]) -> Vec<i64> {
    rows.windows(2)
        .map(|pair| (pair[1].posted_on - pair[0].posted_on).num_days())
        .collect()
}

fn compare_commitments(left: &RecurringCommitment, right: &RecurringCommitment) -> Ordering {
    left.cadence
        .as_str()
        .cmp(right.cadence.as_str())
        .then_with(|| right.confidence.total_cmp(&left.confidence))
        .then_with(|| left.merchant.cmp(&right.merchant))
}

/// Element at index `len / 2` of the sorted values; even-length input takes
/// the upper-middle element instead of averaging.
fn index_median_i64(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    Some(sorted[sorted.len() / 2])
}

fn median_f64(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mid = values.len() / 2;
    if values.len().is_multiple_of(2) {
        return Some((values[mid - 1] + values[mid]) / 2.0);
    }
    Some(values[mid])
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use crate::insights::date::CadenceKind;
    use crate::insights::types::Transaction;

    use super::{detect_recurring_commitments, index_median_i64};

    fn series(description: &str, start: &str, gaps: &[i64], amount: f64) -> Vec<Transaction> {
        let mut date = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap_or(NaiveDate::MIN);
        let mut rows = vec![Transaction::new(
            &date.format("%Y-%m-%d").to_string(),
            amount,
            description,
            0.0,
        )];
        for gap in gaps {
            date += Duration::days(*gap);
            rows.push(Transaction::new(
                &date.format("%Y-%m-%d").to_string(),
                amount,
                description,
                0.0,
            ));
        }
        rows
    }

    #[test]
    fn four_weekly_charges_are_weekly_with_full_confidence() {
        let rows = series("GYM MEMBERSHIP 123", "2026-01-02", &[7, 7, 7], -15.0);
        let found = detect_recurring_commitments(&rows);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].merchant, "Gym Membership");
        assert_eq!(found[0].cadence, CadenceKind::Weekly);
        assert_eq!(found[0].occurrences, 4);
        assert!((found[0].confidence - 1.0).abs() < f64::EPSILON);
        assert_eq!(found[0].last_seen.to_string(), "2026-01-23");
    }

    #[test]
    fn one_irregular_gap_lowers_confidence() {
        let rows = series("GYM MEMBERSHIP", "2026-01-02", &[7, 20, 7, 7], -15.0);
        let found = detect_recurring_commitments(&rows);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].cadence, CadenceKind::Weekly);
        assert!((found[0].confidence - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn five_of_eight_in_range_gaps_round_half_to_even() {
        let rows = series("GYM MEMBERSHIP", "2026-01-02", &[7, 7, 7, 7, 7, 20, 20, 20], -15.0);
        let found = detect_recurring_commitments(&rows);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].cadence, CadenceKind::Weekly);
        assert!((found[0].confidence - 0.62).abs() < f64::EPSILON);
    }

    #[test]
    fn feed_without_descriptions_has_no_commitments() {
        let rows = series("", "2026-01-02", &[7, 7, 7], -15.0)
            .into_iter()
            .map(|row| Transaction {
                description: None,
                ..row
            })
            .collect::<Vec<Transaction>>();
        assert!(detect_recurring_commitments(&rows).is_empty());
    }

    #[test]
    fn rows_missing_a_description_still_group_when_others_have_one() {
        let mut rows = series("NETFLIX COM", "2026-01-05", &[31, 28], -16.99);
        rows.push(Transaction {
            description: None,
            ..Transaction::new("2026-04-05", -16.99, "", 0.0)
        });
        let found = detect_recurring_commitments(&rows);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].merchant, "Netflix Com");
    }

    #[test]
    fn two_occurrences_are_never_recurring() {
        let rows = series("NETFLIX COM", "2026-01-05", &[31], -16.99);
        assert!(detect_recurring_commitments(&rows).is_empty());
    }

    #[test]
    fn income_rows_are_ignored() {
        let rows = series("SALARY ACME", "2026-01-05", &[14, 14, 14], 2000.0);
        assert!(detect_recurring_commitments(&rows).is_empty());
    }

    #[test]
    fn median_gap_outside_ranges_is_dropped() {
        let rows = series("DOG WALKER", "2026-01-03", &[14, 14, 14], -35.0);
        assert!(detect_recurring_commitments(&rows).is_empty());
    }

    #[test]
    fn even_gap_count_uses_upper_middle_element() {
        assert_eq!(index_median_i64(&[7, 30]), Some(30));
        assert_eq!(index_median_i64(&[30, 7, 7, 30]), Some(30));
        assert_eq!(index_median_i64(&[9, 7, 8]), Some(8));
        assert_eq!(index_median_i64(&[]), None);
    }

    #[test]
    fn index_median_decides_cadence_at_the_boundary() {
        // gaps 7,7,30,30: an averaged median (18.5) matches nothing,
        // the index median (30) classifies as monthly
        let rows = series("ENERGY CO", "2026-01-01", &[7, 7, 30, 30], -80.0);
        let found = detect_recurring_commitments(&rows);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].cadence, CadenceKind::Monthly);
        assert!((found[0].confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn median_amount_averages_the_middle_pair() {
        let mut rows = series("SPOTIFY P", "2026-01-01", &[31, 28, 31], -10.0);
        rows[1].amount = Some(-12.0);
        rows[2].amount = Some(-13.0);
        let found = detect_recurring_commitments(&rows);
        assert_eq!(found.len(), 1);
        assert!((found[0].median_amount - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn results_sort_monthly_first_then_by_confidence() {
        let mut rows = series("WEEKLY BOX", "2026-01-01", &[7, 7, 7], -20.0);
        rows.extend(series("RENTAL CO", "2026-01-01", &[31, 28, 31], -400.0));
        rows.extend(series("ZIP PHONE", "2026-01-01", &[31, 45, 31, 28], -30.0));
        let found = detect_recurring_commitments(&rows);
        let order = found
            .iter()
            .map(|row| (row.merchant.as_str(), row.cadence.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                ("Rental Co", "monthly"),
                ("Zip Phone", "monthly"),
                ("Weekly Box", "weekly"),
            ]
        );
    }

    #[test]
    fn unparseable_dates_and_missing_amounts_are_dropped_silently() {
        let mut rows = series("WEEKLY BOX", "2026-01-01", &[7, 7], -20.0);
        rows.push(Transaction::new("??", -20.0, "WEEKLY BOX", 0.0));
        assert!(detect_recurring_commitments(&rows).is_empty());
        assert!(detect_recurring_commitments(&[]).is_empty());
    }
}
