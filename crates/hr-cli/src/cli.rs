//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

use hr_core::{OverrideStatus, WorkMode};

use crate::commands::util::{parse_date, parse_datetime, parse_month};

/// HR attendance tool.
///
/// Records clock-ins and clock-outs, resolves a status for every employee
/// and day, and summarizes attendance over days, months and years.
#[derive(Debug, Parser)]
#[command(name = "hr", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage the employee roster.
    #[command(subcommand)]
    Employee(EmployeeAction),

    /// Manage the holiday calendar.
    #[command(subcommand)]
    Holiday(HolidayAction),

    /// Clock in for a day.
    ClockIn {
        /// Employee ID.
        employee: String,

        #[command(flatten)]
        clock: ClockArgs,

        /// Capture channel (e.g. Web, Mobile, Biometric).
        #[arg(long, default_value = "Web")]
        channel: String,
    },

    /// Clock out of an open session.
    ClockOut {
        /// Employee ID.
        employee: String,

        #[command(flatten)]
        clock: ClockArgs,
    },

    /// Replace the status of an attendance record.
    Override {
        /// Attendance record ID.
        record: String,

        /// New status (present, late, absent, leave, holiday, permission, half-day).
        #[arg(value_parser = parse_status)]
        status: OverrideStatus,

        #[arg(long)]
        reason: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove the override from an attendance record.
    ClearOverride {
        /// Attendance record ID.
        record: String,
    },

    /// Set a status for an employee and date, creating the record if needed.
    Mark {
        employee: String,

        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        #[arg(value_parser = parse_status)]
        status: OverrideStatus,

        #[arg(long)]
        reason: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Import attendance rows (JSON Lines) from stdin.
    Import,

    /// Show the resolved status and worked time for one employee and day.
    Status {
        employee: String,

        /// Day to resolve (defaults to today).
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Reference time for open sessions (defaults to now).
        #[arg(long, value_parser = parse_datetime)]
        at: Option<NaiveDateTime>,

        #[arg(long)]
        json: bool,
    },

    /// List attendance rows for a month.
    List {
        /// Limit to one employee.
        #[arg(long)]
        employee: Option<String>,

        /// Month as YYYY-MM (defaults to the current month).
        #[arg(long, value_parser = parse_month)]
        month: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Show one employee's month as a calendar.
    Calendar {
        employee: String,

        /// Month as YYYY-MM (defaults to the current month).
        #[arg(long, value_parser = parse_month)]
        month: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Show today's and this period's attendance counters.
    Summary {
        /// Limit to one employee (defaults to everyone).
        #[arg(long)]
        employee: Option<String>,

        /// Reference date (defaults to today).
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Use the calendar year as the period instead of the month.
        #[arg(long)]
        year: bool,

        #[arg(long)]
        json: bool,
    },

    /// Show a live worked-time counter for an open session.
    Watch {
        employee: String,

        /// Day of the session (defaults to today).
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

/// Shared arguments for clock actions.
#[derive(Debug, clap::Args)]
pub struct ClockArgs {
    /// Timestamp of the action (defaults to now).
    #[arg(long, value_parser = parse_datetime)]
    pub at: Option<NaiveDateTime>,

    /// Business day of the session (defaults to the date of --at).
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Free-text location.
    #[arg(long)]
    pub location: Option<String>,

    /// Record on behalf of the employee, bypassing the work-mode gate.
    #[arg(long)]
    pub admin: bool,
}

/// Roster subcommands.
#[derive(Debug, Subcommand)]
pub enum EmployeeAction {
    /// Add or update an employee.
    Add {
        id: String,

        #[arg(long)]
        name: String,

        /// office, remote or hybrid.
        #[arg(long, value_parser = parse_work_mode, default_value = "office")]
        mode: WorkMode,
    },
    /// List employees.
    List {
        #[arg(long)]
        json: bool,
    },
}

/// Holiday subcommands.
#[derive(Debug, Subcommand)]
pub enum HolidayAction {
    /// Add or rename a holiday.
    Add {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// Display name.
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Remove a holiday.
    Remove {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// List holidays.
    List {
        /// Limit to one year.
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        json: bool,
    },
}

fn parse_status(s: &str) -> Result<OverrideStatus, String> {
    s.parse().map_err(|e: hr_core::ValidationError| e.to_string())
}

fn parse_work_mode(s: &str) -> Result<WorkMode, String> {
    s.parse().map_err(|e: hr_core::ValidationError| e.to_string())
}
