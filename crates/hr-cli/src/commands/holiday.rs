//! Holiday calendar commands.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::NaiveDate;

use hr_db::Database;

pub fn add<W: Write>(writer: &mut W, db: &mut Database, date: NaiveDate, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("holiday name cannot be empty");
    }
    db.add_holiday(date, name)?;
    writeln!(writer, "Added holiday {date}: {name}")?;
    Ok(())
}

pub fn remove<W: Write>(writer: &mut W, db: &mut Database, date: NaiveDate) -> Result<()> {
    if db.remove_holiday(date)? {
        writeln!(writer, "Removed holiday {date}")?;
    } else {
        writeln!(writer, "No holiday on {date}")?;
    }
    Ok(())
}

pub fn list<W: Write>(writer: &mut W, db: &Database, year: Option<i32>, json: bool) -> Result<()> {
    let holidays = db.list_holidays(year)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&holidays)?)?;
        return Ok(());
    }

    if holidays.is_empty() {
        writeln!(writer, "No holidays.")?;
        return Ok(());
    }
    for holiday in holidays {
        writeln!(
            writer,
            "{} {}  {}",
            holiday.date,
            holiday.date.format("%a"),
            holiday.name
        )?;
    }
    Ok(())
}
