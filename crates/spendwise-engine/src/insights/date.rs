use chrono::{Datelike, Duration, NaiveDate};

use crate::insights::types::Window;
use crate::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CadenceKind {
    Monthly,
    Weekly,
}

impl CadenceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
        }
    }
}

/// Returns the equal-length window that ends the day before `start`, or
/// `None` when that window would start before `NaiveDate::MIN`.
pub fn previous_window(start: NaiveDate, end: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let window_length = (end - start).num_days() + 1;
    let previous_end = start.checked_sub_signed(Duration::days(1))?;
    let previous_start = previous_end.checked_sub_signed(Duration::days(window_length - 1))?;
    Some((previous_start, previous_end))
}

pub fn build_window(from: &str, to: &str, command: &str) -> EngineResult<Window> {
    let start = parse_iso_date_strict(from, "from", command)?;
    let end = parse_iso_date_strict(to, "to", command)?;

    if start > end {
        return Err(EngineError::invalid_argument_for_command(
            "Invalid date range: `from` must be on or before `to`.",
            Some(command),
        ));
    }

    Ok(Window::new(start, end))
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn month_key(date: &NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Lenient parse used on feed rows. Accepts `YYYY-MM-DD`, an ISO datetime
/// starting with one, and the bank export form `DD/MM/YYYY`.
pub fn parse_transaction_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if looks_like_iso_date(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok();
    }
    if let Some((head, tail)) = trimmed.split_at_checked(10)
        && looks_like_iso_date(head)
        && (tail.starts_with('T') || tail.starts_with(' '))
    {
        return NaiveDate::parse_from_str(head, "%Y-%m-%d").ok();
    }
    if looks_like_day_first_date(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok();
    }
    None
}

fn parse_iso_date_strict(value: &str, field_name: &str, command: &str) -> EngineResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(EngineError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        EngineError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

fn looks_like_iso_date(value: &str) -> bool {
    has_shape(value, b'-', [4, 7])
}

fn looks_like_day_first_date(value: &str) -> bool {
    has_shape(value, b'/', [2, 5])
}

fn has_shape(value: &str, separator: u8, separator_positions: [usize; 2]) -> bool {
    if value.len() != 10 {
        return false;
    }
    value.bytes().enumerate().all(|(index, byte)| {
        if separator_positions.contains(&index) {
            byte == separator
        } else {
            byte.is_ascii_digit()
        }
    })
}
