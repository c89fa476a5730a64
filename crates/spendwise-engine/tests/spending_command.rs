mod support;

use serde_json::Value;
use spendwise_engine::commands::spending::{self, SpendingRunOptions};
use support::feed_testkit::{QUARTER_FEED, category_total, data_rows, feed_from_csv, payload, transaction};

fn close(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|value| (value - expected).abs() < 1e-6)
}

#[test]
fn spending_totals_the_whole_feed_largest_first() {
    let feed = feed_from_csv(QUARTER_FEED);
    let value = payload(spending::run(&feed, None, None));
    assert_eq!(value["command"], Value::from("spending"));
    assert!(value["data"].get("window").is_none());

    let rows = data_rows(&value, "rows");
    let order = rows
        .iter()
        .filter_map(|row| row["category"].as_str())
        .collect::<Vec<&str>>();
    assert_eq!(
        order,
        vec![
            "Utilities",
            "Transfer",
            "Groceries",
            "Health",
            "Subscriptions",
            "Transport",
            "Other",
        ]
    );
    assert_eq!(category_total(&rows, "Utilities"), Some(2010.0));
    assert!(close(category_total(&rows, "Groceries"), 306.55));
    // the undated row still counts when no window is applied
    assert!(close(category_total(&rows, "Other"), 39.5));
    assert_eq!(category_total(&rows, "Income"), None);
}

#[test]
fn spending_window_drops_rows_without_a_parseable_date() {
    let feed = feed_from_csv(QUARTER_FEED);
    let value = payload(spending::run(&feed, Some("2026-02-01"), Some("2026-02-28")));
    assert_eq!(value["data"]["window"]["from"], Value::from("2026-02-01"));

    let rows = data_rows(&value, "rows");
    assert!(close(category_total(&rows, "Other"), 9.5));
    assert_eq!(category_total(&rows, "Utilities"), Some(650.0));
    assert!(close(category_total(&rows, "Transport"), 42.1));
}

#[test]
fn spending_can_exclude_transfers() {
    let feed = feed_from_csv(QUARTER_FEED);
    let value = payload(spending::run_with_options(SpendingRunOptions {
        transactions: &feed,
        exclude_transfers: true,
        ..SpendingRunOptions::default()
    }));
    assert_eq!(value["data"]["exclude_transfers"], Value::from(true));
    let rows = data_rows(&value, "rows");
    assert_eq!(category_total(&rows, "Transfer"), None);
    // rent moves out of Transfer through its reason, so it stays in
    assert_eq!(category_total(&rows, "Utilities"), Some(2010.0));
}

#[test]
fn spending_ignores_income_and_missing_amounts() {
    let mut rows = vec![
        transaction("2026-01-01", 2500.0, "Salary ACME"),
        transaction("2026-01-02", -20.0, "COLES 0412 CHATSWOOD"),
    ];
    rows[1].amount = None;
    let value = payload(spending::run(&rows, None, None));
    assert!(data_rows(&value, "rows").is_empty());
}

#[test]
fn spending_rejects_invalid_windows() {
    let feed = feed_from_csv(QUARTER_FEED);
    for (from, to) in [
        (Some("2026-02-28"), Some("2026-02-01")),
        (None, Some("2026-02-01")),
        (Some("2026-13-01"), Some("2026-12-31")),
    ] {
        let result = spending::run(&feed, from, to);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
        }
    }
}
