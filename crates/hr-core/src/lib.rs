//! Attendance resolution and metrics engine.
//!
//! This crate contains the pure logic for:
//! - Calendar classification (holiday, weekend, workday)
//! - The per-day clock-in/clock-out session state machine
//! - Status resolution from overrides, calendar and sessions
//! - Elapsed work time for open and closed sessions
//! - Day/month/year metrics for one employee or the whole roster

pub mod calendar;
mod elapsed;
pub mod import;
mod ledger;
pub mod metrics;
pub mod session;
pub mod status;
pub mod types;
pub mod views;

pub use calendar::{DayType, HolidayCalendar, HolidayEntry, WeekendPolicy};
pub use elapsed::{elapsed_seconds, format_hms};
pub use import::{ImportReport, ImportRow, ImportRowError, ValidatedRow};
pub use ledger::AttendanceLedger;
pub use metrics::{Dashboard, MetricsSnapshot, Scope, Window, WindowKind, aggregate, dashboard};
pub use session::{AttendanceRecord, SessionError, SessionState};
pub use status::{DEFAULT_ON_TIME_CUTOFF, OverrideStatus, Resolution, Resolver, Status};
pub use types::{Employee, EmployeeId, RecordId, ValidationError, WorkMode};
