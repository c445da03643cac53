//! Administrative status commands: override, clear-override and mark.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use hr_core::{AttendanceRecord, OverrideStatus, RecordId, Resolver};
use hr_db::Database;

use super::util::employee_id;

fn record_id(raw: &str) -> Result<RecordId> {
    RecordId::new(raw).with_context(|| format!("invalid record ID: {raw:?}"))
}

pub fn override_status<W: Write>(
    writer: &mut W,
    db: &mut Database,
    resolver: &Resolver,
    record: &str,
    status: OverrideStatus,
    reason: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    let record = db.override_status(&record_id(record)?, status, reason, notes)?;
    write_outcome(writer, resolver, &record)
}

pub fn clear<W: Write>(
    writer: &mut W,
    db: &mut Database,
    resolver: &Resolver,
    record: &str,
) -> Result<()> {
    let record = db.clear_override(&record_id(record)?)?;
    write_outcome(writer, resolver, &record)
}

#[expect(
    clippy::too_many_arguments,
    reason = "mirrors the mark subcommand's arguments"
)]
pub fn mark<W: Write>(
    writer: &mut W,
    db: &mut Database,
    resolver: &Resolver,
    employee: &str,
    date: NaiveDate,
    status: OverrideStatus,
    reason: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    let record = db.mark(&employee_id(employee)?, date, status, reason, notes)?;
    write_outcome(writer, resolver, &record)
}

fn write_outcome<W: Write>(
    writer: &mut W,
    resolver: &Resolver,
    record: &AttendanceRecord,
) -> Result<()> {
    let resolution = resolver.resolve(Some(record), record.date);
    writeln!(
        writer,
        "{} {}: {}",
        record.employee_id,
        record.date,
        resolution.display()
    )?;
    if let Some(reason) = &record.reason {
        writeln!(writer, "Reason: {reason}")?;
    }
    if let Some(notes) = &record.notes {
        writeln!(writer, "Notes: {notes}")?;
    }
    Ok(())
}
