use serde_json::Value;
use spendwise_engine::insights::Transaction;
use spendwise_engine::{EngineResult, SuccessEnvelope};

/// Reads a headerless bank export (`date,amount,description,balance`).
/// Fields that fail to parse become `None`, as a lenient upstream would
/// leave them.
pub fn feed_from_csv(text: &str) -> Vec<Transaction> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        assert!(record.is_ok());
        let Ok(record) = record else {
            continue;
        };
        rows.push(Transaction {
            date: record.get(0).map(std::string::ToString::to_string),
            amount: record.get(1).and_then(|value| value.parse::<f64>().ok()),
            description: record.get(2).map(std::string::ToString::to_string),
            cumulative_balance: record.get(3).and_then(|value| value.parse::<f64>().ok()),
            category: None,
        });
    }
    rows
}

pub fn transaction(date: &str, amount: f64, description: &str) -> Transaction {
    Transaction::new(date, amount, description, 0.0)
}

pub fn payload(result: EngineResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(value) = value {
            return value;
        }
    }
    Value::Null
}

pub fn data_rows(payload: &Value, key: &str) -> Vec<Value> {
    payload["data"][key].as_array().cloned().unwrap_or_default()
}

pub fn recurring_group_exists(rows: &[Value], merchant: &str, cadence: &str) -> bool {
    rows.iter().any(|row| {
        row.get("merchant").and_then(Value::as_str) == Some(merchant)
            && row.get("cadence").and_then(Value::as_str) == Some(cadence)
    })
}

pub fn category_total(rows: &[Value], category: &str) -> Option<f64> {
    rows.iter()
        .find(|row| row.get("category").and_then(Value::as_str) == Some(category))
        .and_then(|row| row.get("total"))
        .and_then(Value::as_f64)
}

/// A CommBank-style export covering January to March 2026.
pub const QUARTER_FEED: &str = "\
02/01/2026,-15.00,ANYTIME FITNESS CROWS NEST NSW,4985.00
05/01/2026,-16.99,NETFLIX.COM 8663579 AU,4968.01
09/01/2026,-15.00,ANYTIME FITNESS CROWS NEST NSW,4953.01
12/01/2026,-84.20,WOOLWORTHS 1234 SYDNEY NSW,4868.81
15/01/2026,3200.00,Salary ACME PTY LTD,8068.81
16/01/2026,-15.00,ANYTIME FITNESS CROWS NEST NSW,8053.81
20/01/2026,-650.00,Transfer to xx6405 CommBank app Rent,7403.81
23/01/2026,-15.00,ANYTIME FITNESS CROWS NEST NSW,7388.81
25/01/2026,-500.00,Transfer to xx1111 CommBank app,6888.81
05/02/2026,-16.99,NETFLIX.COM 8663579 AU,6871.82
10/02/2026,-102.35,COLES 0412 CHATSWOOD,6769.47
15/02/2026,3200.00,Salary ACME PTY LTD,9969.47
18/02/2026,-42.10,UBER *TRIP SYDNEY,9927.37
20/02/2026,-650.00,Transfer to xx6405 CommBank app Rent,9277.37
22/02/2026,-9.50,ZZ MYSTERY VENDOR,9267.87
05/03/2026,-16.99,NETFLIX.COM 8663579 AU,9250.88
07/03/2026,-60.00,Direct Debit TELSTRA CORP 99887766,9190.88
11/03/2026,-120.00,WOOLWORTHS 1234 SYDNEY NSW,9070.88
15/03/2026,3200.00,Salary ACME PTY LTD,12270.88
20/03/2026,-650.00,Transfer to xx6405 CommBank app Rent,11620.88
31/02/2026,-30.00,MYSTERY DATE,11590.88
";
