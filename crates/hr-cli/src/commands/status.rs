//! Status command for one employee and day.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use hr_core::{
    EmployeeId, RecordId, Resolver, SessionState, Status, elapsed_seconds, format_hms,
};
use hr_db::{Database, DbError};

use super::util::{employee_id, now_local};

/// Resolved view of one (employee, date).
#[derive(Debug, Serialize)]
pub struct DayStatus {
    pub employee_id: EmployeeId,
    pub name: String,
    pub date: NaiveDate,
    pub status: Status,
    pub label: String,
    pub session: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_in: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<NaiveDateTime>,
    pub worked_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

const fn session_name(session: SessionState) -> &'static str {
    match session {
        SessionState::NoSession => "none",
        SessionState::Open { .. } => "open",
        SessionState::Closed { .. } => "closed",
    }
}

/// Loads and resolves the day. Fails with `UnknownEmployee` for IDs not on
/// the roster.
pub fn day_status(
    db: &Database,
    resolver: &Resolver,
    employee: &EmployeeId,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Result<DayStatus, DbError> {
    let profile = db
        .employee(employee)?
        .ok_or_else(|| DbError::UnknownEmployee(employee.clone()))?;
    let record = db.record(employee, date)?;
    let resolution = resolver.resolve(record.as_ref(), date);
    let session = SessionState::of(record.as_ref());

    Ok(DayStatus {
        employee_id: profile.id,
        name: profile.name,
        date,
        label: resolution.display().to_string(),
        status: resolution.status,
        session: session_name(session),
        clock_in: record.as_ref().and_then(|r| r.clock_in),
        clock_out: record.as_ref().and_then(|r| r.clock_out),
        worked_seconds: elapsed_seconds(session, now),
        record_id: record.as_ref().map(|r| r.id.clone()),
        channel: record.as_ref().map(|r| r.channel.clone()),
        reason: record.as_ref().and_then(|r| r.reason.clone()),
        notes: record.and_then(|r| r.notes),
    })
}

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    resolver: &Resolver,
    employee: &str,
    date: Option<NaiveDate>,
    at: Option<NaiveDateTime>,
    json: bool,
) -> Result<()> {
    let now = at.unwrap_or_else(now_local);
    let date = date.unwrap_or_else(|| now.date());
    let status = day_status(db, resolver, &employee_id(employee)?, date, now)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&status)?)?;
    } else {
        write_status(writer, &status)?;
    }
    Ok(())
}

fn write_status<W: Write>(writer: &mut W, status: &DayStatus) -> Result<()> {
    writeln!(writer, "{} ({})", status.name, status.employee_id)?;
    writeln!(writer, "Date:    {} {}", status.date, status.date.format("%a"))?;
    writeln!(writer, "Status:  {}", status.label)?;

    match (status.clock_in, status.clock_out) {
        (Some(start), Some(end)) => writeln!(
            writer,
            "Session: {} - {}",
            start.format("%H:%M:%S"),
            end.format("%H:%M:%S")
        )?,
        (Some(start), None) => {
            writeln!(writer, "Session: open since {}", start.format("%H:%M:%S"))?;
        }
        _ => writeln!(writer, "Session: none")?,
    }
    writeln!(writer, "Worked:  {}", format_hms(status.worked_seconds))?;

    if let Some(reason) = &status.reason {
        writeln!(writer, "Reason:  {reason}")?;
    }
    if let Some(notes) = &status.notes {
        writeln!(writer, "Notes:   {notes}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use hr_core::{Employee, HolidayCalendar, HolidayEntry, WeekendPolicy, WorkMode};
    use hr_db::ClockOrigin;
    use insta::assert_snapshot;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn setup() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.add_employee(&Employee {
            id: EmployeeId::new("EMP-1").unwrap(),
            name: "Ada".to_string(),
            work_mode: WorkMode::Remote,
        })
        .unwrap();
        db
    }

    #[test]
    fn open_session_shows_running_time() {
        let mut db = setup();
        let employee = EmployeeId::new("EMP-1").unwrap();
        db.clock_in(
            &employee,
            date(4),
            date(4).and_hms_opt(8, 45, 0).unwrap(),
            &ClockOrigin::self_service("Web"),
        )
        .unwrap();

        let mut output = Vec::new();
        run(
            &mut output,
            &db,
            &Resolver::default(),
            "EMP-1",
            Some(date(4)),
            Some(date(4).and_hms_opt(11, 0, 30).unwrap()),
            false,
        )
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
Ada (EMP-1)
Date:    2024-03-04 Mon
Status:  Present
Session: open since 08:45:00
Worked:  02:15:30
");
    }

    #[test]
    fn holiday_without_record_shows_holiday_name() {
        let db = setup();
        let resolver = Resolver::new(
            HolidayCalendar::new(
                [HolidayEntry {
                    date: date(8),
                    name: "Founders Day".to_string(),
                }],
                WeekendPolicy::default(),
            ),
            hr_core::DEFAULT_ON_TIME_CUTOFF,
        );

        let status = day_status(
            &db,
            &resolver,
            &EmployeeId::new("EMP-1").unwrap(),
            date(8),
            date(8).and_hms_opt(12, 0, 0).unwrap(),
        )
        .unwrap();
        assert_eq!(status.status, Status::Holiday);
        assert_eq!(status.label, "Founders Day");
        assert_eq!(status.session, "none");
        assert_eq!(status.worked_seconds, 0);
    }

    #[test]
    fn json_output_for_closed_session() {
        let mut db = setup();
        let employee = EmployeeId::new("EMP-1").unwrap();
        let origin = ClockOrigin::self_service("Web");
        db.clock_in(&employee, date(5), date(5).and_hms_opt(9, 0, 0).unwrap(), &origin)
            .unwrap();
        db.clock_out(&employee, date(5), date(5).and_hms_opt(17, 30, 0).unwrap(), &origin)
            .unwrap();

        let mut output = Vec::new();
        run(
            &mut output,
            &db,
            &Resolver::default(),
            "EMP-1",
            Some(date(5)),
            Some(date(6).and_hms_opt(0, 0, 0).unwrap()),
            true,
        )
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed["status"], "present_on_time");
        assert_eq!(parsed["session"], "closed");
        assert_eq!(parsed["worked_seconds"], 30_600);
        assert_eq!(parsed["channel"], "Web");
    }

    #[test]
    fn unknown_employee_is_an_error() {
        let db = setup();
        let err = day_status(
            &db,
            &Resolver::default(),
            &EmployeeId::new("EMP-404").unwrap(),
            date(4),
            date(4).and_hms_opt(9, 0, 0).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, DbError::UnknownEmployee(_)));
    }
}
