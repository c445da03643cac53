//! List command: attendance rows for a month.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use hr_core::views::{ListRow, list_rows};
use hr_core::{Resolver, Scope, Window, format_hms};
use hr_db::{Database, DbError};

use super::util::{employee_id, now_local};

/// Resolves the scope argument, checking that a named employee exists.
pub fn scope(db: &Database, employee: Option<&str>) -> Result<Scope> {
    let Some(raw) = employee else {
        return Ok(Scope::All);
    };
    let id = employee_id(raw)?;
    if db.employee(&id)?.is_none() {
        return Err(DbError::UnknownEmployee(id).into());
    }
    Ok(Scope::Employee(id))
}

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    resolver: &Resolver,
    employee: Option<&str>,
    month: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let now = now_local();
    let window = Window::month(month.unwrap_or_else(|| now.date()));
    let rows = collect(db, resolver, employee, window, now)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        write_table(writer, &rows)?;
    }
    Ok(())
}

fn collect(
    db: &Database,
    resolver: &Resolver,
    employee: Option<&str>,
    window: Window,
    now: NaiveDateTime,
) -> Result<Vec<ListRow>> {
    let scope = scope(db, employee)?;
    let (first, last) = window.bounds();
    let ledger = db.load_ledger(first, last)?;
    Ok(list_rows(resolver, &ledger, &scope, window, now))
}

fn clock_cell(ts: Option<NaiveDateTime>) -> String {
    ts.map_or_else(|| "-".to_string(), |ts| ts.format("%H:%M:%S").to_string())
}

fn write_table<W: Write>(writer: &mut W, rows: &[ListRow]) -> Result<()> {
    if rows.is_empty() {
        writeln!(writer, "No attendance recorded.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<10}  {:<10}  {:<8}  {:<8}  {:<8}  STATUS",
        "DATE", "EMPLOYEE", "IN", "OUT", "WORKED"
    )?;
    for row in rows {
        writeln!(
            writer,
            "{:<10}  {:<10}  {:<8}  {:<8}  {:<8}  {}",
            row.date.to_string(),
            row.employee_id.as_str(),
            clock_cell(row.clock_in),
            clock_cell(row.clock_out),
            format_hms(row.worked_seconds),
            row.label
        )?;
    }
    Ok(())
}
