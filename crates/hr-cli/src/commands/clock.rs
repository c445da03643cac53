//! Clock-in and clock-out commands.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use hr_core::{AttendanceRecord, EmployeeId, Resolver, SessionState, elapsed_seconds, format_hms};
use hr_db::{ClockOrigin, Database};

use super::util::{employee_id, now_local};
use crate::ClockArgs;

pub fn clock_in<W: Write>(
    writer: &mut W,
    db: &mut Database,
    resolver: &Resolver,
    employee: &str,
    args: &ClockArgs,
    channel: &str,
) -> Result<()> {
    clock_in_at(writer, db, resolver, employee, args, channel, now_local())
}

fn clock_in_at<W: Write>(
    writer: &mut W,
    db: &mut Database,
    resolver: &Resolver,
    employee: &str,
    args: &ClockArgs,
    channel: &str,
    now: NaiveDateTime,
) -> Result<()> {
    let employee_id = employee_id(employee)?;
    let at = args.at.unwrap_or(now);
    let date = args.date.unwrap_or_else(|| at.date());
    let origin = origin(args, channel);

    let (record, provisional) =
        db.clock_in_with_status(&employee_id, date, at, &origin, resolver)?;

    writeln!(writer, "Clocked in {employee_id} at {at} for {date}")?;
    writeln!(writer, "Record: {}", record.id)?;
    writeln!(writer, "Status: {}", provisional.display())?;
    Ok(())
}

pub fn clock_out<W: Write>(
    writer: &mut W,
    db: &mut Database,
    employee: &str,
    args: &ClockArgs,
) -> Result<()> {
    clock_out_at(writer, db, employee, args, now_local())
}

fn clock_out_at<W: Write>(
    writer: &mut W,
    db: &mut Database,
    employee: &str,
    args: &ClockArgs,
    now: NaiveDateTime,
) -> Result<()> {
    let employee_id = employee_id(employee)?;
    let at = args.at.unwrap_or(now);
    let date = match args.date {
        Some(date) => date,
        None => session_date(db, &employee_id)?.unwrap_or_else(|| at.date()),
    };
    let origin = origin(args, "Web");

    let record = db.clock_out(&employee_id, date, at, &origin)?;

    writeln!(writer, "Clocked out {employee_id} at {at} for {date}")?;
    writeln!(writer, "Worked: {}", worked(&record, at))?;
    Ok(())
}

/// Business day of the employee's open session, if one is running.
pub fn session_date(db: &Database, employee_id: &EmployeeId) -> Result<Option<NaiveDate>> {
    Ok(db.open_session(employee_id)?.map(|record| record.date))
}

fn origin(args: &ClockArgs, channel: &str) -> ClockOrigin {
    let origin = if args.admin {
        ClockOrigin::administrative(channel)
    } else {
        ClockOrigin::self_service(channel)
    };
    origin.with_location(args.location.clone())
}

fn worked(record: &AttendanceRecord, now: NaiveDateTime) -> String {
    format_hms(elapsed_seconds(SessionState::of(Some(record)), now))
}
