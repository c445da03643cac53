//! Status resolution: one authoritative status per (employee, date).
//!
//! # Resolution order
//!
//! First match wins:
//!
//! 1. An administrator/import status stored on the record.
//! 2. A holiday from the calendar (labelled with the holiday name).
//! 3. A session on the record: on-time if clock-in is at or before the
//!    cutoff, late otherwise.
//! 4. A weekend day.
//! 5. Otherwise `None`. An unmarked workday is not an absence.
//!
//! The order does not depend on "today", so historical and current dates
//! resolve the same way, and resolving the same inputs twice gives the same
//! answer.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::{DayType, HolidayCalendar};
use crate::session::{AttendanceRecord, SessionState};
use crate::types::ValidationError;

/// Default on-time cutoff (09:00 local).
pub const DEFAULT_ON_TIME_CUTOFF: NaiveTime = match NaiveTime::from_hms_opt(9, 0, 0) {
    Some(time) => time,
    None => panic!("09:00 is a valid time"),
};

/// A status stored directly on a record by an administrator or an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideStatus {
    Present,
    Late,
    Absent,
    Leave,
    Holiday,
    Permission,
    HalfDay,
}

impl OverrideStatus {
    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Late => "late",
            Self::Absent => "absent",
            Self::Leave => "leave",
            Self::Holiday => "holiday",
            Self::Permission => "permission",
            Self::HalfDay => "half_day",
        }
    }

    /// The resolved status this override stands for.
    #[must_use]
    pub const fn resolved(self) -> Status {
        match self {
            Self::Present => Status::PresentOnTime,
            Self::Late => Status::PresentLate,
            Self::Absent => Status::Absent,
            Self::Leave => Status::Leave,
            Self::Holiday => Status::Holiday,
            Self::Permission => Status::Permission,
            Self::HalfDay => Status::HalfDay,
        }
    }
}

impl fmt::Display for OverrideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OverrideStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "present" => Ok(Self::Present),
            "late" => Ok(Self::Late),
            "absent" => Ok(Self::Absent),
            "leave" => Ok(Self::Leave),
            "holiday" => Ok(Self::Holiday),
            "permission" => Ok(Self::Permission),
            "half_day" | "halfday" => Ok(Self::HalfDay),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// Authoritative day classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Holiday,
    Weekend,
    PresentOnTime,
    PresentLate,
    Absent,
    Leave,
    Permission,
    HalfDay,
    /// No record and nothing to infer (future date, missing data).
    None,
}

impl Status {
    /// Short label for list and calendar cells.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Holiday => "Holiday",
            Self::Weekend => "Weekend",
            Self::PresentOnTime => "Present",
            Self::PresentLate => "Late",
            Self::Absent => "Absent",
            Self::Leave => "Leave",
            Self::Permission => "Permission",
            Self::HalfDay => "Half Day",
            Self::None => "-",
        }
    }

    /// Statuses that count toward `total_present`.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(
            self,
            Self::PresentOnTime | Self::PresentLate | Self::Permission | Self::HalfDay
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved status plus an optional display label (the holiday name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Resolution {
    const fn plain(status: Status) -> Self {
        Self {
            status,
            label: None,
        }
    }

    /// Label to show for this resolution: the holiday name when present.
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.status.label())
    }
}

/// Combines the calendar, session and overrides into a [`Resolution`].
#[derive(Debug, Clone)]
pub struct Resolver {
    calendar: HolidayCalendar,
    on_time_cutoff: NaiveTime,
}

impl Resolver {
    pub const fn new(calendar: HolidayCalendar, on_time_cutoff: NaiveTime) -> Self {
        Self {
            calendar,
            on_time_cutoff,
        }
    }

    pub const fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    pub const fn on_time_cutoff(&self) -> NaiveTime {
        self.on_time_cutoff
    }

    /// Resolves the status of `date` given the (optional) record for it.
    pub fn resolve(&self, record: Option<&AttendanceRecord>, date: NaiveDate) -> Resolution {
        let day_type = self.calendar.classify(date);

        if let Some(status) = record.and_then(|r| r.status) {
            let label = match (status, day_type) {
                (OverrideStatus::Holiday, DayType::Holiday(name)) => Some(name.to_string()),
                _ => None,
            };
            return Resolution {
                status: status.resolved(),
                label,
            };
        }

        if let DayType::Holiday(name) = day_type {
            return Resolution {
                status: Status::Holiday,
                label: Some(name.to_string()),
            };
        }

        if let Some(clock_in) = SessionState::of(record).clock_in() {
            return Resolution::plain(self.punctuality(clock_in.time()));
        }

        if day_type == DayType::Weekend {
            return Resolution::plain(Status::Weekend);
        }

        Resolution::plain(Status::None)
    }

    /// On-time if `clock_in` is at or before the cutoff.
    pub fn punctuality(&self, clock_in: NaiveTime) -> Status {
        if clock_in <= self.on_time_cutoff {
            Status::PresentOnTime
        } else {
            Status::PresentLate
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(HolidayCalendar::default(), DEFAULT_ON_TIME_CUTOFF)
    }
}
