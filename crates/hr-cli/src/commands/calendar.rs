//! Calendar command: one employee's month, day by day.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use hr_core::views::{CalendarCell, month_calendar};
use hr_core::{EmployeeId, MetricsSnapshot, Resolver, Scope, Window, aggregate, format_hms};
use hr_db::{Database, DbError};

use super::util::{employee_id, now_local};

#[derive(Debug, Serialize)]
pub struct MonthCalendar {
    pub employee_id: EmployeeId,
    pub name: String,
    pub month: String,
    pub days: Vec<CalendarCell>,
    pub totals: MetricsSnapshot,
}

pub fn build(
    db: &Database,
    resolver: &Resolver,
    employee: &EmployeeId,
    anchor: NaiveDate,
    now: NaiveDateTime,
) -> Result<MonthCalendar, DbError> {
    let profile = db
        .employee(employee)?
        .ok_or_else(|| DbError::UnknownEmployee(employee.clone()))?;
    let window = Window::month(anchor);
    let (first, last) = window.bounds();
    let ledger = db.load_ledger(first, last)?;

    Ok(MonthCalendar {
        employee_id: profile.id,
        name: profile.name,
        month: anchor.format("%Y-%m").to_string(),
        days: month_calendar(resolver, &ledger, employee, anchor, now),
        totals: aggregate(resolver, &ledger, &Scope::Employee(employee.clone()), window),
    })
}

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    resolver: &Resolver,
    employee: &str,
    month: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let now = now_local();
    let calendar = build(
        db,
        resolver,
        &employee_id(employee)?,
        month.unwrap_or_else(|| now.date()),
        now,
    )?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&calendar)?)?;
    } else {
        write_calendar(writer, &calendar)?;
    }
    Ok(())
}

fn write_calendar<W: Write>(writer: &mut W, calendar: &MonthCalendar) -> Result<()> {
    writeln!(
        writer,
        "{} ({}) {}",
        calendar.name, calendar.employee_id, calendar.month
    )?;
    for cell in &calendar.days {
        if cell.worked_seconds > 0 {
            writeln!(
                writer,
                "{} {}  {:<14}{}",
                cell.date.format("%d"),
                cell.date.format("%a"),
                cell.label,
                format_hms(cell.worked_seconds)
            )?;
        } else {
            writeln!(
                writer,
                "{} {}  {}",
                cell.date.format("%d"),
                cell.date.format("%a"),
                cell.label
            )?;
        }
    }

    let totals = &calendar.totals;
    writeln!(
        writer,
        "Present {} (on time {}, late {}), absent {}, leave {}, holidays {}",
        totals.total_present, totals.on_time, totals.late, totals.absent, totals.leave,
        totals.holiday
    )?;
    Ok(())
}
