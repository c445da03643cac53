//! Bulk import rows: parsing and per-row validation.
//!
//! Each row is validated on its own; a bad row is reported and the rest of
//! the batch carries on.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::OverrideStatus;
use crate::types::{EmployeeId, parse_time_of_day};

/// Channel tag applied to imported rows that do not name one.
pub const IMPORT_CHANNEL: &str = "Import";

/// Stored dates and times are four-digit-year text; later years would not
/// sort chronologically.
const MAX_YEAR: i32 = 9999;

/// Why a single import row was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportRowError {
    #[error("malformed import row: {0}")]
    MalformedImportRow(String),
    #[error("unknown employee: {0}")]
    UnknownEmployee(EmployeeId),
}

impl ImportRowError {
    fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedImportRow(reason.into())
    }
}

/// A raw row as it arrives from an import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    pub employee_id: String,
    pub date: String,
    #[serde(default)]
    pub clock_in: Option<String>,
    #[serde(default)]
    pub clock_out: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A row that passed validation and can be upserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRow {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub clock_in: Option<NaiveDateTime>,
    pub clock_out: Option<NaiveDateTime>,
    pub status: Option<OverrideStatus>,
    pub channel: String,
    pub location: Option<String>,
}

/// A rejected row and its 1-based position in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row: usize,
    pub error: String,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub upserted: usize,
    pub rejected: Vec<RejectedRow>,
}

impl ImportReport {
    pub fn reject(&mut self, row: usize, error: &ImportRowError) {
        tracing::warn!(row, %error, "rejected import row");
        self.rejected.push(RejectedRow {
            row,
            error: error.to_string(),
        });
    }
}

fn check_year(year: i32, value: &str) -> Result<(), ImportRowError> {
    if (0..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ImportRowError::malformed(format!("year out of range: {value}")))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a timestamp that is either a bare time on `date` or a full
/// `YYYY-MM-DDTHH:MM[:SS]` date-time.
fn parse_timestamp(value: &str, date: NaiveDate) -> Result<NaiveDateTime, ImportRowError> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }
    parse_time_of_day(value)
        .map(|time| date.and_time(time))
        .map_err(|_| ImportRowError::malformed(format!("invalid timestamp: {value}")))
}

impl ImportRow {
    /// Validates the row into typed values.
    pub fn validate(&self) -> Result<ValidatedRow, ImportRowError> {
        let employee_id = EmployeeId::new(self.employee_id.trim())
            .map_err(|e| ImportRowError::malformed(e.to_string()))?;

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ImportRowError::malformed(format!("invalid date: {}", self.date)))?;
        check_year(date.year(), &self.date)?;

        let clock_in = non_empty(self.clock_in.as_deref())
            .map(|v| parse_timestamp(v, date))
            .transpose()?;
        let clock_out = non_empty(self.clock_out.as_deref())
            .map(|v| parse_timestamp(v, date))
            .transpose()?;
        for ts in clock_in.iter().chain(clock_out.iter()) {
            check_year(ts.year(), &ts.to_string())?;
        }

        match (clock_in, clock_out) {
            (None, Some(_)) => {
                return Err(ImportRowError::malformed("clock-out without clock-in"));
            }
            (Some(start), Some(end)) if end <= start => {
                return Err(ImportRowError::malformed("clock-out must be after clock-in"));
            }
            _ => {}
        }

        let status = non_empty(self.status.as_deref())
            .map(str::parse::<OverrideStatus>)
            .transpose()
            .map_err(|e| ImportRowError::malformed(e.to_string()))?;

        if clock_in.is_none() && status.is_none() {
            return Err(ImportRowError::malformed("row has neither clock-in nor status"));
        }

        Ok(ValidatedRow {
            employee_id,
            date,
            clock_in,
            clock_out,
            status,
            channel: non_empty(self.channel.as_deref())
                .unwrap_or(IMPORT_CHANNEL)
                .to_string(),
            location: non_empty(self.location.as_deref()).map(str::to_string),
        })
    }
}
