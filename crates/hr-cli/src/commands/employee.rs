//! Roster commands: `hr employee add` and `hr employee list`.

use std::io::Write;

use anyhow::Result;

use hr_core::{Employee, WorkMode};
use hr_db::Database;

use super::util::employee_id;

pub fn add<W: Write>(
    writer: &mut W,
    db: &mut Database,
    id: &str,
    name: &str,
    work_mode: WorkMode,
) -> Result<()> {
    let employee = Employee {
        id: employee_id(id)?,
        name: name.trim().to_string(),
        work_mode,
    };
    db.add_employee(&employee)?;
    writeln!(
        writer,
        "Saved employee {} ({}, {})",
        employee.id, employee.name, employee.work_mode
    )?;
    Ok(())
}

pub fn list<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let employees = db.list_employees()?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&employees)?)?;
        return Ok(());
    }

    if employees.is_empty() {
        writeln!(writer, "No employees.")?;
        return Ok(());
    }

    writeln!(writer, "{:<12} {:<8} NAME", "ID", "MODE")?;
    for employee in employees {
        writeln!(
            writer,
            "{:<12} {:<8} {}",
            employee.id.as_str(),
            employee.work_mode.as_str(),
            employee.name
        )?;
    }
    Ok(())
}
