//! Import command for bulk-loading attendance rows from JSON Lines.
//!
//! Each non-empty line is one object with `employee_id`, `date` and any of
//! `clock_in`, `clock_out`, `status`, `channel`, `location`. A bad line is
//! reported by number and the rest of the batch is still applied.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use hr_core::{ImportReport, ImportRow, ImportRowError};
use hr_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &mut Database) -> Result<ImportReport> {
    let stdin = io::stdin();
    import_from(writer, db, stdin.lock())
}

fn import_from<W: Write, R: BufRead>(
    writer: &mut W,
    db: &mut Database,
    reader: R,
) -> Result<ImportReport> {
    let rows = parse_rows(reader)?;
    let report = db.import_rows(rows)?;

    writeln!(
        writer,
        "Imported {} rows, {} rejected",
        report.upserted,
        report.rejected.len()
    )?;
    for rejected in &report.rejected {
        writeln!(writer, "  line {}: {}", rejected.row, rejected.error)?;
    }
    Ok(report)
}

/// Numbers every non-empty line and parses it, keeping JSON errors per row.
fn parse_rows<R: BufRead>(reader: R) -> Result<Vec<(usize, Result<ImportRow, ImportRowError>)>> {
    let mut rows = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parsed = serde_json::from_str::<ImportRow>(trimmed)
            .map_err(|e| ImportRowError::MalformedImportRow(format!("invalid JSON: {e}")));
        rows.push((idx + 1, parsed));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use chrono::NaiveDate;
    use hr_core::{Employee, EmployeeId, OverrideStatus, WorkMode};
    use insta::assert_snapshot;

    fn setup() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.add_employee(&Employee {
            id: EmployeeId::new("EMP-1").unwrap(),
            name: "Ada".to_string(),
            work_mode: WorkMode::Office,
        })
        .unwrap();
        db
    }

    #[test]
    fn parse_rows_skips_blank_lines_and_keeps_line_numbers() {
        let input = "{\"employee_id\":\"EMP-1\",\"date\":\"2024-03-04\",\"status\":\"leave\"}\n\nnot json\n";
        let rows = parse_rows(Cursor::new(input)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 1);
        assert!(rows[0].1.is_ok());
        assert_eq!(rows[1].0, 3);
        assert!(matches!(
            rows[1].1,
            Err(ImportRowError::MalformedImportRow(_))
        ));
    }

    #[test]
    fn import_reports_bad_rows_and_applies_the_rest() {
        let mut db = setup();
        let input = [
            r#"{"employee_id":"EMP-1","date":"2024-03-04","clock_in":"08:55","clock_out":"17:00","channel":"Biometric"}"#,
            r#"{"employee_id":"EMP-9","date":"2024-03-04","status":"absent"}"#,
            r#"{"employee_id":"EMP-1","date":"2024-03-05","clock_in":"18:00","clock_out":"09:00"}"#,
            r#"{"employee_id":"EMP-1""#,
            r#"{"employee_id":"EMP-1","date":"2024-03-06","status":"half-day"}"#,
        ]
        .join("\n");

        let mut output = Vec::new();
        let report = import_from(&mut output, &mut db, Cursor::new(input)).unwrap();
        assert_eq!(report.upserted, 2);
        assert_eq!(
            report.rejected.iter().map(|r| r.row).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );

        let output = String::from_utf8(output).unwrap();
        let summary = output.lines().next().unwrap();
        assert_snapshot!(summary, @"Imported 2 rows, 3 rejected");
        assert!(output.contains("line 2: unknown employee: EMP-9"));

        let employee = EmployeeId::new("EMP-1").unwrap();
        let first = db
            .record(&employee, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(first.channel, "Biometric");
        let half_day = db
            .record(&employee, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(half_day.status, Some(OverrideStatus::HalfDay));
    }
}
