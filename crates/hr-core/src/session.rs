//! Attendance records and the per-day clock-in/clock-out state machine.
//!
//! A record holds at most one session per (employee, date):
//!
//! ```text
//! NoSession --clock_in--> Open --clock_out--> Closed
//! ```
//!
//! `Closed` is terminal for the day. Administrative corrections bypass these
//! transitions and are applied by the store directly.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::OverrideStatus;
use crate::types::{EmployeeId, RecordId};

/// Rejected clock transitions. None of these leave partial state behind.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("already clocked in for this date")]
    AlreadyClockedIn,
    #[error("not clocked in for this date")]
    NotClockedIn,
    #[error("already clocked out for this date")]
    AlreadyClockedOut,
    #[error("clock-out must be after clock-in")]
    InvalidOrdering,
}

/// Session state derived from a record's timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    Open {
        clock_in: NaiveDateTime,
    },
    Closed {
        clock_in: NaiveDateTime,
        clock_out: NaiveDateTime,
    },
}

impl SessionState {
    /// Session state of an optional record; a missing record has no session.
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        record.map_or(Self::NoSession, AttendanceRecord::session)
    }

    pub const fn clock_in(&self) -> Option<NaiveDateTime> {
        match self {
            Self::NoSession => None,
            Self::Open { clock_in } | Self::Closed { clock_in, .. } => Some(*clock_in),
        }
    }

    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// One row per (employee, calendar date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: RecordId,
    pub employee_id: EmployeeId,
    /// The employee's local business day.
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_in: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<NaiveDateTime>,
    /// Status set by an administrator or an import. Computed statuses are
    /// never stored here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OverrideStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Informational capture channel ("Web", "Biometric", "Import", ...).
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Creates an empty record with no session and no override.
    pub fn new(
        id: RecordId,
        employee_id: EmployeeId,
        date: NaiveDate,
        channel: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            employee_id,
            date,
            clock_in: None,
            clock_out: None,
            status: None,
            reason: None,
            notes: None,
            channel: channel.into(),
            location: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Current session state.
    pub fn session(&self) -> SessionState {
        match (self.clock_in, self.clock_out) {
            (Some(clock_in), Some(clock_out)) => SessionState::Closed {
                clock_in,
                clock_out,
            },
            (Some(clock_in), None) => SessionState::Open { clock_in },
            // A clock-out without a clock-in is never written; treat it as no session.
            (None, _) => SessionState::NoSession,
        }
    }

    /// Records a clock-in. Valid only from `NoSession`.
    pub fn clock_in(&mut self, at: NaiveDateTime) -> Result<(), SessionError> {
        if self.clock_in.is_some() {
            return Err(SessionError::AlreadyClockedIn);
        }
        self.clock_in = Some(at);
        Ok(())
    }

    /// Records a clock-out. Valid only from `Open`, and only after the clock-in.
    pub fn clock_out(&mut self, at: NaiveDateTime) -> Result<(), SessionError> {
        match self.session() {
            SessionState::NoSession => Err(SessionError::NotClockedIn),
            SessionState::Closed { .. } => Err(SessionError::AlreadyClockedOut),
            SessionState::Open { clock_in } if at <= clock_in => {
                Err(SessionError::InvalidOrdering)
            }
            SessionState::Open { .. } => {
                self.clock_out = Some(at);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn record() -> AttendanceRecord {
        AttendanceRecord::new(
            RecordId::new("rec-1").unwrap(),
            EmployeeId::new("EMP-1").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            "Web",
            Utc::now(),
        )
    }

    #[test]
    fn new_record_has_no_session() {
        let rec = record();
        assert_eq!(rec.session(), SessionState::NoSession);
        assert_eq!(SessionState::of(None), SessionState::NoSession);
    }

    #[test]
    fn clock_in_then_out_walks_the_states() {
        let mut rec = record();
        rec.clock_in(at(9, 0, 0)).unwrap();
        assert_eq!(
            rec.session(),
            SessionState::Open {
                clock_in: at(9, 0, 0)
            }
        );

        rec.clock_out(at(18, 0, 0)).unwrap();
        assert_eq!(
            rec.session(),
            SessionState::Closed {
                clock_in: at(9, 0, 0),
                clock_out: at(18, 0, 0)
            }
        );
    }

    #[test]
    fn second_clock_in_is_rejected() {
        let mut rec = record();
        rec.clock_in(at(9, 0, 0)).unwrap();
        assert_eq!(rec.clock_in(at(9, 5, 0)), Err(SessionError::AlreadyClockedIn));
        assert_eq!(rec.clock_in, Some(at(9, 0, 0)));
    }

    #[test]
    fn clock_in_after_close_is_rejected() {
        let mut rec = record();
        rec.clock_in(at(9, 0, 0)).unwrap();
        rec.clock_out(at(10, 0, 0)).unwrap();
        assert_eq!(rec.clock_in(at(11, 0, 0)), Err(SessionError::AlreadyClockedIn));
    }

    #[test]
    fn clock_out_without_clock_in_is_rejected() {
        let mut rec = record();
        assert_eq!(rec.clock_out(at(18, 0, 0)), Err(SessionError::NotClockedIn));
        assert_eq!(rec.clock_out, None);
    }

    #[test]
    fn second_clock_out_is_rejected() {
        let mut rec = record();
        rec.clock_in(at(9, 0, 0)).unwrap();
        rec.clock_out(at(17, 0, 0)).unwrap();
        assert_eq!(
            rec.clock_out(at(18, 0, 0)),
            Err(SessionError::AlreadyClockedOut)
        );
        assert_eq!(rec.clock_out, Some(at(17, 0, 0)));
    }

    #[test]
    fn clock_out_must_be_strictly_after_clock_in() {
        let mut rec = record();
        rec.clock_in(at(9, 0, 0)).unwrap();
        assert_eq!(rec.clock_out(at(9, 0, 0)), Err(SessionError::InvalidOrdering));
        assert_eq!(rec.clock_out(at(8, 0, 0)), Err(SessionError::InvalidOrdering));
        assert!(rec.session().is_open());
    }
}
