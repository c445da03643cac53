//! Metrics aggregation over day, month and year windows.
//!
//! Every (employee, date) in the window is resolved and bucketed. `Weekend`
//! and `None` days are not counted anywhere; holidays get their own bucket
//! but are not working days.

use std::ops::{Add, AddAssign};

use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ledger::AttendanceLedger;
use crate::status::{Resolver, Status};
use crate::types::EmployeeId;

/// Whose attendance is aggregated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Employee(EmployeeId),
    /// Every employee on the roster.
    All,
}

/// Window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Day,
    Month,
    Year,
}

/// A calendar window anchored at a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub kind: WindowKind,
    pub anchor: NaiveDate,
}

impl Window {
    pub const fn day(anchor: NaiveDate) -> Self {
        Self {
            kind: WindowKind::Day,
            anchor,
        }
    }

    pub const fn month(anchor: NaiveDate) -> Self {
        Self {
            kind: WindowKind::Month,
            anchor,
        }
    }

    pub const fn year(anchor: NaiveDate) -> Self {
        Self {
            kind: WindowKind::Year,
            anchor,
        }
    }

    /// First and last date of the window, both inclusive.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match self.kind {
            WindowKind::Day => (self.anchor, self.anchor),
            WindowKind::Month => {
                let first = self.anchor.with_day(1).unwrap_or(self.anchor);
                let next_month = first
                    .checked_add_months(chrono::Months::new(1))
                    .unwrap_or(NaiveDate::MAX);
                (first, next_month.pred_opt().unwrap_or(next_month))
            }
            WindowKind::Year => {
                let year = self.anchor.year();
                let first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(self.anchor);
                let last = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(self.anchor);
                (first, last)
            }
        }
    }

    /// Every date in the window, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let (first, last) = self.bounds();
        first.iter_days().take_while(move |d| *d <= last)
    }
}

/// Per-bucket counters for a scope and window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub on_time: u32,
    pub late: u32,
    pub absent: u32,
    pub leave: u32,
    pub holiday: u32,
    pub permission: u32,
    pub half_day: u32,
    /// `on_time + late + permission + half_day`.
    pub total_present: u32,
    /// Days that resolved to anything but weekend, holiday or none.
    pub working_days: u32,
}

impl MetricsSnapshot {
    /// Counts one resolved day.
    pub fn record(&mut self, status: Status) {
        match status {
            Status::PresentOnTime => self.on_time += 1,
            Status::PresentLate => self.late += 1,
            Status::Absent => self.absent += 1,
            Status::Leave => self.leave += 1,
            Status::Holiday => self.holiday += 1,
            Status::Permission => self.permission += 1,
            Status::HalfDay => self.half_day += 1,
            Status::Weekend | Status::None => return,
        }
        if status.is_present() {
            self.total_present += 1;
        }
        if status != Status::Holiday {
            self.working_days += 1;
        }
    }

    /// `total_present / working_days`, or 0 when there are no working days.
    pub fn attendance_rate(&self) -> f64 {
        if self.working_days == 0 {
            return 0.0;
        }
        f64::from(self.total_present) / f64::from(self.working_days)
    }
}

impl AddAssign for MetricsSnapshot {
    fn add_assign(&mut self, rhs: Self) {
        self.on_time += rhs.on_time;
        self.late += rhs.late;
        self.absent += rhs.absent;
        self.leave += rhs.leave;
        self.holiday += rhs.holiday;
        self.permission += rhs.permission;
        self.half_day += rhs.half_day;
        self.total_present += rhs.total_present;
        self.working_days += rhs.working_days;
    }
}

impl Add for MetricsSnapshot {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl std::iter::Sum for MetricsSnapshot {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, snapshot| acc + snapshot)
    }
}

/// Aggregates resolved statuses for `scope` over `window`.
pub fn aggregate(
    resolver: &Resolver,
    ledger: &AttendanceLedger,
    scope: &Scope,
    window: Window,
) -> MetricsSnapshot {
    let snapshot = match scope {
        Scope::Employee(employee) => aggregate_employee(resolver, ledger, employee, window),
        Scope::All => {
            let employees: Vec<&EmployeeId> = ledger.employees().collect();
            employees
                .par_iter()
                .map(|employee| aggregate_employee(resolver, ledger, employee, window))
                .reduce(MetricsSnapshot::default, |a, b| a + b)
        }
    };
    tracing::debug!(?scope, ?window, ?snapshot, "aggregated attendance");
    snapshot
}

fn aggregate_employee(
    resolver: &Resolver,
    ledger: &AttendanceLedger,
    employee: &EmployeeId,
    window: Window,
) -> MetricsSnapshot {
    let mut snapshot = MetricsSnapshot::default();
    for date in window.dates() {
        let resolution = resolver.resolve(ledger.record(employee, date), date);
        snapshot.record(resolution.status);
    }
    snapshot
}

/// The "today" and "this period" cards for one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub today: MetricsSnapshot,
    pub period: MetricsSnapshot,
    pub period_window: Window,
}

/// Builds the dashboard for `scope`: a day window on `today` and a
/// `period` window (month or year) containing it.
pub fn dashboard(
    resolver: &Resolver,
    ledger: &AttendanceLedger,
    scope: &Scope,
    today: NaiveDate,
    period: WindowKind,
) -> Dashboard {
    let period_window = Window {
        kind: period,
        anchor: today,
    };
    Dashboard {
        today: aggregate(resolver, ledger, scope, Window::day(today)),
        period: aggregate(resolver, ledger, scope, period_window),
        period_window,
    }
}
