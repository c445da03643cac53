//! Shared utilities for CLI commands.

use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use hr_core::EmployeeId;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date: {s}. Use YYYY-MM-DD (e.g., 2024-03-04)"))
}

/// Parses a local wall-clock timestamp such as `2024-03-04T09:15:00`.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s.trim(), format).ok())
        .ok_or_else(|| {
            format!("Invalid timestamp: {s}. Use YYYY-MM-DDTHH:MM[:SS] (e.g., 2024-03-04T09:15:00)")
        })
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| format!("Invalid month: {s}. Use YYYY-MM (e.g., 2024-03)"))
}

/// Current local wall-clock time, second precision.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn employee_id(raw: &str) -> anyhow::Result<EmployeeId> {
    EmployeeId::new(raw).with_context(|| format!("invalid employee ID: {raw:?}"))
}
