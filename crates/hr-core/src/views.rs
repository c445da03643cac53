//! Read models for list and calendar presentation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::elapsed::elapsed_seconds;
use crate::ledger::AttendanceLedger;
use crate::metrics::{Scope, Window};
use crate::session::SessionState;
use crate::status::{Resolver, Status};
use crate::types::{EmployeeId, RecordId};

/// One line of the attendance list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub date: NaiveDate,
    pub employee_id: EmployeeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_in: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<NaiveDateTime>,
    pub worked_seconds: i64,
    pub status: Status,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

/// One day of an employee's month calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub status: Status,
    pub label: String,
    pub worked_seconds: i64,
}

fn scope_employees<'a>(ledger: &'a AttendanceLedger, scope: &'a Scope) -> Vec<&'a EmployeeId> {
    match scope {
        Scope::Employee(employee) => vec![employee],
        Scope::All => ledger.employees().collect(),
    }
}

/// Rows for every (employee, date) in the window that has a record or falls
/// on a holiday, ordered by date then employee.
pub fn list_rows(
    resolver: &Resolver,
    ledger: &AttendanceLedger,
    scope: &Scope,
    window: Window,
    now: NaiveDateTime,
) -> Vec<ListRow> {
    let employees = scope_employees(ledger, scope);
    let mut rows = Vec::new();
    for date in window.dates() {
        for employee in &employees {
            let record = ledger.record(employee, date);
            let resolution = resolver.resolve(record, date);
            if record.is_none() && resolution.status != Status::Holiday {
                continue;
            }
            rows.push(ListRow {
                date,
                employee_id: (*employee).clone(),
                record_id: record.map(|r| r.id.clone()),
                clock_in: record.and_then(|r| r.clock_in),
                clock_out: record.and_then(|r| r.clock_out),
                worked_seconds: elapsed_seconds(SessionState::of(record), now),
                label: resolution.display().to_string(),
                status: resolution.status,
                channel: record.map(|r| r.channel.clone()),
            });
        }
    }
    rows
}

/// Every date of the month containing `anchor`, resolved for `employee`.
pub fn month_calendar(
    resolver: &Resolver,
    ledger: &AttendanceLedger,
    employee: &EmployeeId,
    anchor: NaiveDate,
    now: NaiveDateTime,
) -> Vec<CalendarCell> {
    Window::month(anchor)
        .dates()
        .map(|date| {
            let record = ledger.record(employee, date);
            let resolution = resolver.resolve(record, date);
            CalendarCell {
                date,
                label: resolution.display().to_string(),
                status: resolution.status,
                worked_seconds: elapsed_seconds(SessionState::of(record), now),
            }
        })
        .collect()
}
