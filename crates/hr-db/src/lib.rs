//! Storage layer for the attendance engine.
//!
//! Provides persistence for employees, holidays and attendance records using
//! `rusqlite`.
//!
//! # Write serialization
//!
//! Every write (`clock_in`, `clock_out`, overrides, imports) runs inside an
//! `IMMEDIATE` transaction, which takes the database write lock up front.
//! Two connections racing to clock in the same employee on the same date are
//! therefore serialized: the loser waits (up to the busy timeout), then reads
//! the winner's committed row and fails with `AlreadyClockedIn`. The
//! `UNIQUE (employee_id, date)` constraint backs this up at the schema level.
//!
//! Reads see either the state before or after a write, never a partial row.
//!
//! # Thread Safety
//!
//! [`Database`] wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! Use one `Database` per thread, or wrap it in a `Mutex`.
//!
//! # Schema
//!
//! Dates are stored as `YYYY-MM-DD` and clock timestamps as naive local
//! `YYYY-MM-DDTHH:MM:SS` text, so lexicographic order matches chronological
//! order. Audit timestamps are RFC 3339 UTC.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use thiserror::Error;
use uuid::Uuid;

use hr_core::import::{ImportReport, ImportRow, ImportRowError};
use hr_core::{
    AttendanceLedger, AttendanceRecord, Employee, EmployeeId, HolidayCalendar, HolidayEntry,
    OverrideStatus, RecordId, Resolution, Resolver, SessionError, WeekendPolicy, WorkMode,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const CLOCK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Channel tag for records created by administrative marking.
pub const ADMIN_CHANNEL: &str = "Admin";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A clock transition was rejected.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// The employee is not on the roster.
    #[error("unknown employee: {0}")]
    UnknownEmployee(EmployeeId),
    /// Self-service clocking is not offered for this employee's work mode.
    #[error("self-service clock-in is not available for {employee_id} ({work_mode} employee)")]
    SelfServiceUnavailable {
        employee_id: EmployeeId,
        work_mode: WorkMode,
    },
    /// No attendance record has this ID.
    #[error("attendance record not found: {0}")]
    RecordNotFound(String),
    /// A stored value could not be decoded.
    #[error("invalid stored value for {key}: {message}")]
    InvalidStoredValue { key: String, message: String },
}

/// Where a clock action came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockOrigin {
    /// Informational channel tag ("Web", "Mobile", "Biometric", ...).
    pub channel: String,
    pub location: Option<String>,
    /// Self-service actions are gated on the employee's work mode.
    pub self_service: bool,
}

impl ClockOrigin {
    pub fn self_service(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            location: None,
            self_service: true,
        }
    }

    pub fn administrative(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            location: None,
            self_service: false,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for serialization guarantees.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.busy_timeout(BUSY_TIMEOUT)?;
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS employees (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                work_mode TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS holidays (
                date TEXT PRIMARY KEY,
                name TEXT NOT NULL
            );

            -- One row per (employee, date).
            -- clock_in/clock_out: naive local 'YYYY-MM-DDTHH:MM:SS'
            -- status: administrator/import override, NULL when computed
            CREATE TABLE IF NOT EXISTS attendance (
                id TEXT PRIMARY KEY,
                employee_id TEXT NOT NULL,
                date TEXT NOT NULL,
                clock_in TEXT,
                clock_out TEXT,
                status TEXT,
                reason TEXT,
                notes TEXT,
                channel TEXT NOT NULL,
                location TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (employee_id, date),
                CHECK (clock_out IS NULL OR (clock_in IS NOT NULL AND clock_out > clock_in)),
                FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);
            ",
        )?;
        Ok(())
    }

    // ========== Employees ==========

    /// Adds an employee, replacing name and work mode if the ID exists.
    pub fn add_employee(&mut self, employee: &Employee) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO employees (id, name, work_mode) VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET name = excluded.name, work_mode = excluded.work_mode
            ",
            params![
                employee.id.as_str(),
                employee.name,
                employee.work_mode.as_str()
            ],
        )?;
        tracing::info!(employee_id = %employee.id, work_mode = %employee.work_mode, "saved employee");
        Ok(())
    }

    pub fn employee(&self, id: &EmployeeId) -> Result<Option<Employee>, DbError> {
        find_employee(&self.conn, id)
    }

    /// Lists employees ordered by ID.
    pub fn list_employees(&self) -> Result<Vec<Employee>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, work_mode FROM employees ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        let mut employees = Vec::new();
        for row in rows {
            let (id, name, work_mode) = row?;
            employees.push(decode_employee(id, name, &work_mode)?);
        }
        Ok(employees)
    }

    // ========== Holidays ==========

    /// Adds a holiday, renaming it if the date already has one.
    pub fn add_holiday(&mut self, date: NaiveDate, name: &str) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO holidays (date, name) VALUES (?, ?)
            ON CONFLICT(date) DO UPDATE SET name = excluded.name
            ",
            params![format_date(date), name],
        )?;
        tracing::info!(%date, name, "saved holiday");
        Ok(())
    }

    /// Removes a holiday. Returns false if there was none on that date.
    pub fn remove_holiday(&mut self, date: NaiveDate) -> Result<bool, DbError> {
        let removed = self.conn.execute(
            "DELETE FROM holidays WHERE date = ?",
            params![format_date(date)],
        )?;
        Ok(removed > 0)
    }

    /// Lists holidays ordered by date, optionally limited to one year.
    pub fn list_holidays(&self, year: Option<i32>) -> Result<Vec<HolidayEntry>, DbError> {
        let (start, end) = match year {
            Some(year) => (format!("{year:04}-01-01"), format!("{year:04}-12-31")),
            None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
        };
        let mut stmt = self.conn.prepare(
            "SELECT date, name FROM holidays WHERE date >= ? AND date <= ? ORDER BY date ASC",
        )?;
        let rows = stmt.query_map([start, end], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut holidays = Vec::new();
        for row in rows {
            let (date, name) = row?;
            holidays.push(HolidayEntry {
                date: parse_date(&date, "holiday")?,
                name,
            });
        }
        Ok(holidays)
    }

    /// Builds a calendar from every stored holiday.
    pub fn holiday_calendar(&self, weekend: WeekendPolicy) -> Result<HolidayCalendar, DbError> {
        Ok(HolidayCalendar::new(self.list_holidays(None)?, weekend))
    }

    // ========== Clock actions ==========

    /// Records a clock-in for (employee, date).
    ///
    /// Creates the record if none exists. Fails with `AlreadyClockedIn` if the
    /// record already has a clock-in.
    pub fn clock_in(
        &mut self,
        employee_id: &EmployeeId,
        date: NaiveDate,
        at: NaiveDateTime,
        origin: &ClockOrigin,
    ) -> Result<AttendanceRecord, DbError> {
        let now = Utc::now();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let employee = require_employee(&tx, employee_id)?;
        check_self_service(&employee, origin)?;

        let mut record = match find_record(&tx, employee_id, date)? {
            Some(record) => record,
            None => AttendanceRecord::new(new_record_id()?, employee_id.clone(), date, "", now),
        };
        record.clock_in(at)?;
        record.channel.clone_from(&origin.channel);
        if origin.location.is_some() {
            record.location.clone_from(&origin.location);
        }
        record.updated_at = now;
        write_record(&tx, &record)?;
        tx.commit()?;

        tracing::info!(%employee_id, %date, %at, channel = %origin.channel, "clocked in");
        Ok(record)
    }

    /// Clocks in and resolves the day right away, so on-time or late is
    /// known before clock-out. A stored override still wins.
    pub fn clock_in_with_status(
        &mut self,
        employee_id: &EmployeeId,
        date: NaiveDate,
        at: NaiveDateTime,
        origin: &ClockOrigin,
        resolver: &Resolver,
    ) -> Result<(AttendanceRecord, Resolution), DbError> {
        let record = self.clock_in(employee_id, date, at, origin)?;
        let resolution = resolver.resolve(Some(&record), date);
        Ok((record, resolution))
    }

    /// Records a clock-out for (employee, date).
    ///
    /// `date` is the business day the session was opened on, which may be
    /// earlier than `at` for sessions that run past midnight.
    pub fn clock_out(
        &mut self,
        employee_id: &EmployeeId,
        date: NaiveDate,
        at: NaiveDateTime,
        origin: &ClockOrigin,
    ) -> Result<AttendanceRecord, DbError> {
        let now = Utc::now();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let employee = require_employee(&tx, employee_id)?;
        check_self_service(&employee, origin)?;

        let mut record =
            find_record(&tx, employee_id, date)?.ok_or(SessionError::NotClockedIn)?;
        record.clock_out(at)?;
        if origin.location.is_some() {
            record.location.clone_from(&origin.location);
        }
        record.updated_at = now;
        write_record(&tx, &record)?;
        tx.commit()?;

        tracing::info!(%employee_id, %date, %at, "clocked out");
        Ok(record)
    }

    // ========== Administrative overrides ==========

    /// Overwrites the stored status of a record.
    ///
    /// This is a direct replacement; the previous status is not consulted.
    pub fn override_status(
        &mut self,
        record_id: &RecordId,
        status: OverrideStatus,
        reason: Option<&str>,
        notes: Option<&str>,
    ) -> Result<AttendanceRecord, DbError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut record = find_record_by_id(&tx, record_id)?
            .ok_or_else(|| DbError::RecordNotFound(record_id.to_string()))?;
        apply_override(&mut record, Some(status), reason, notes);
        write_record(&tx, &record)?;
        tx.commit()?;

        tracing::info!(%record_id, %status, "overrode attendance status");
        Ok(record)
    }

    /// Sets an override for (employee, date), creating the record if needed.
    pub fn mark(
        &mut self,
        employee_id: &EmployeeId,
        date: NaiveDate,
        status: OverrideStatus,
        reason: Option<&str>,
        notes: Option<&str>,
    ) -> Result<AttendanceRecord, DbError> {
        let now = Utc::now();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        require_employee(&tx, employee_id)?;
        let mut record = match find_record(&tx, employee_id, date)? {
            Some(record) => record,
            None => AttendanceRecord::new(
                new_record_id()?,
                employee_id.clone(),
                date,
                ADMIN_CHANNEL,
                now,
            ),
        };
        apply_override(&mut record, Some(status), reason, notes);
        write_record(&tx, &record)?;
        tx.commit()?;

        tracing::info!(%employee_id, %date, %status, "marked attendance");
        Ok(record)
    }

    /// Removes the override from a record so computed resolution applies again.
    pub fn clear_override(&mut self, record_id: &RecordId) -> Result<AttendanceRecord, DbError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut record = find_record_by_id(&tx, record_id)?
            .ok_or_else(|| DbError::RecordNotFound(record_id.to_string()))?;
        apply_override(&mut record, None, None, None);
        write_record(&tx, &record)?;
        tx.commit()?;

        tracing::info!(%record_id, "cleared attendance override");
        Ok(record)
    }

    // ========== Import ==========

    /// Upserts a batch of import rows.
    ///
    /// Each entry carries its 1-based row number and either a parsed row or
    /// the reason it could not be parsed. Invalid rows and rows for unknown
    /// employees are reported; valid rows are written in one transaction.
    pub fn import_rows(
        &mut self,
        rows: impl IntoIterator<Item = (usize, Result<ImportRow, ImportRowError>)>,
    ) -> Result<ImportReport, DbError> {
        let now = Utc::now();
        let mut report = ImportReport::default();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        for (row_number, row) in rows {
            let validated = match row.and_then(|row| row.validate()) {
                Ok(validated) => validated,
                Err(error) => {
                    report.reject(row_number, &error);
                    continue;
                }
            };
            if find_employee(&tx, &validated.employee_id)?.is_none() {
                report.reject(
                    row_number,
                    &ImportRowError::UnknownEmployee(validated.employee_id),
                );
                continue;
            }

            let mut record = match find_record(&tx, &validated.employee_id, validated.date)? {
                Some(record) => record,
                None => AttendanceRecord::new(
                    new_record_id()?,
                    validated.employee_id.clone(),
                    validated.date,
                    "",
                    now,
                ),
            };
            if validated.clock_in.is_some() {
                record.clock_in = validated.clock_in;
                record.clock_out = validated.clock_out;
            }
            if validated.status.is_some() {
                record.status = validated.status;
            }
            if validated.location.is_some() {
                record.location = validated.location;
            }
            record.channel = validated.channel;
            record.updated_at = now;
            write_record(&tx, &record)?;
            report.upserted += 1;
        }
        tx.commit()?;

        tracing::info!(
            upserted = report.upserted,
            rejected = report.rejected.len(),
            "imported attendance rows"
        );
        Ok(report)
    }

    // ========== Reads ==========

    pub fn record(
        &self,
        employee_id: &EmployeeId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, DbError> {
        find_record(&self.conn, employee_id, date)
    }

    /// The employee's most recent record with an open session, if any.
    pub fn open_session(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<AttendanceRecord>, DbError> {
        let raw = self
            .conn
            .query_row(
                &format!(
                    "SELECT {RECORD_COLUMNS} FROM attendance
                     WHERE employee_id = ? AND clock_in IS NOT NULL AND clock_out IS NULL
                     ORDER BY date DESC LIMIT 1"
                ),
                params![employee_id.as_str()],
                read_raw_record,
            )
            .optional()?;
        raw.map(RawRecord::decode).transpose()
    }

    pub fn record_by_id(&self, record_id: &RecordId) -> Result<Option<AttendanceRecord>, DbError> {
        find_record_by_id(&self.conn, record_id)
    }

    /// Loads the full roster and every record dated within `[first, last]`.
    pub fn load_ledger(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<AttendanceLedger, DbError> {
        let employees = self
            .list_employees()?
            .into_iter()
            .map(|employee| employee.id);

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM attendance WHERE date >= ? AND date <= ? ORDER BY date ASC, employee_id ASC"
        ))?;
        let rows = stmt.query_map([format_date(first), format_date(last)], read_raw_record)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?.decode()?);
        }
        tracing::debug!(%first, %last, records = records.len(), "loaded ledger");
        Ok(AttendanceLedger::new(employees, records))
    }
}

const RECORD_COLUMNS: &str = "id, employee_id, date, clock_in, clock_out, status, reason, notes, channel, location, created_at, updated_at";

/// Record columns as stored, before decoding.
struct RawRecord {
    id: String,
    employee_id: String,
    date: String,
    clock_in: Option<String>,
    clock_out: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    notes: Option<String>,
    channel: String,
    location: Option<String>,
    created_at: String,
    updated_at: String,
}

fn read_raw_record(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok(RawRecord {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        date: row.get(2)?,
        clock_in: row.get(3)?,
        clock_out: row.get(4)?,
        status: row.get(5)?,
        reason: row.get(6)?,
        notes: row.get(7)?,
        channel: row.get(8)?,
        location: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

impl RawRecord {
    fn decode(self) -> Result<AttendanceRecord, DbError> {
        let invalid = |message: String| DbError::InvalidStoredValue {
            key: format!("attendance {}", self.id),
            message,
        };
        let status = self
            .status
            .as_deref()
            .map(str::parse::<OverrideStatus>)
            .transpose()
            .map_err(|e| invalid(e.to_string()))?;
        let clock_in = self
            .clock_in
            .as_deref()
            .map(|v| parse_clock(v, &self.id))
            .transpose()?;
        let clock_out = self
            .clock_out
            .as_deref()
            .map(|v| parse_clock(v, &self.id))
            .transpose()?;
        let date = parse_date(&self.date, &self.id)?;
        let created_at = parse_timestamp(&self.created_at, &self.id)?;
        let updated_at = parse_timestamp(&self.updated_at, &self.id)?;
        let id = RecordId::new(self.id.clone()).map_err(|e| invalid(e.to_string()))?;
        let employee_id =
            EmployeeId::new(self.employee_id).map_err(|e| invalid(e.to_string()))?;

        Ok(AttendanceRecord {
            id,
            employee_id,
            date,
            clock_in,
            clock_out,
            status,
            reason: self.reason,
            notes: self.notes,
            channel: self.channel,
            location: self.location,
            created_at,
            updated_at,
        })
    }
}

fn find_record(
    conn: &Connection,
    employee_id: &EmployeeId,
    date: NaiveDate,
) -> Result<Option<AttendanceRecord>, DbError> {
    let raw = conn
        .query_row(
            &format!("SELECT {RECORD_COLUMNS} FROM attendance WHERE employee_id = ? AND date = ?"),
            params![employee_id.as_str(), format_date(date)],
            read_raw_record,
        )
        .optional()?;
    raw.map(RawRecord::decode).transpose()
}

fn find_record_by_id(
    conn: &Connection,
    record_id: &RecordId,
) -> Result<Option<AttendanceRecord>, DbError> {
    let raw = conn
        .query_row(
            &format!("SELECT {RECORD_COLUMNS} FROM attendance WHERE id = ?"),
            params![record_id.as_str()],
            read_raw_record,
        )
        .optional()?;
    raw.map(RawRecord::decode).transpose()
}

fn write_record(conn: &Connection, record: &AttendanceRecord) -> Result<(), DbError> {
    conn.execute(
        "
        INSERT INTO attendance
        (id, employee_id, date, clock_in, clock_out, status, reason, notes, channel, location, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            clock_in = excluded.clock_in,
            clock_out = excluded.clock_out,
            status = excluded.status,
            reason = excluded.reason,
            notes = excluded.notes,
            channel = excluded.channel,
            location = excluded.location,
            updated_at = excluded.updated_at
        ",
        params![
            record.id.as_str(),
            record.employee_id.as_str(),
            format_date(record.date),
            record.clock_in.map(format_clock),
            record.clock_out.map(format_clock),
            record.status.map(|s| s.as_str()),
            record.reason,
            record.notes,
            record.channel,
            record.location,
            format_timestamp(record.created_at),
            format_timestamp(record.updated_at),
        ],
    )?;
    Ok(())
}

fn apply_override(
    record: &mut AttendanceRecord,
    status: Option<OverrideStatus>,
    reason: Option<&str>,
    notes: Option<&str>,
) {
    record.status = status;
    record.reason = reason.map(str::to_string);
    record.notes = notes.map(str::to_string);
    record.updated_at = Utc::now();
}

fn find_employee(conn: &Connection, id: &EmployeeId) -> Result<Option<Employee>, DbError> {
    let row = conn
        .query_row(
            "SELECT id, name, work_mode FROM employees WHERE id = ?",
            params![id.as_str()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;
    row.map(|(id, name, work_mode)| decode_employee(id, name, &work_mode))
        .transpose()
}

fn require_employee(conn: &Connection, id: &EmployeeId) -> Result<Employee, DbError> {
    find_employee(conn, id)?.ok_or_else(|| DbError::UnknownEmployee(id.clone()))
}

fn check_self_service(employee: &Employee, origin: &ClockOrigin) -> Result<(), DbError> {
    if origin.self_service && !employee.work_mode.allows_self_service() {
        return Err(DbError::SelfServiceUnavailable {
            employee_id: employee.id.clone(),
            work_mode: employee.work_mode,
        });
    }
    Ok(())
}

fn decode_employee(id: String, name: String, work_mode: &str) -> Result<Employee, DbError> {
    let invalid = |message: String| DbError::InvalidStoredValue {
        key: format!("employee {id}"),
        message,
    };
    let work_mode = work_mode
        .parse::<WorkMode>()
        .map_err(|e| invalid(e.to_string()))?;
    let employee_id = EmployeeId::new(id.clone()).map_err(|e| invalid(e.to_string()))?;
    Ok(Employee {
        id: employee_id,
        name,
        work_mode,
    })
}

fn new_record_id() -> Result<RecordId, DbError> {
    RecordId::new(Uuid::new_v4().to_string()).map_err(|e| DbError::InvalidStoredValue {
        key: "record id".to_string(),
        message: e.to_string(),
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_clock(at: NaiveDateTime) -> String {
    at.format(CLOCK_FORMAT).to_string()
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_date(value: &str, key: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| DbError::InvalidStoredValue {
        key: key.to_string(),
        message: format!("date {value}: {e}"),
    })
}

fn parse_clock(value: &str, key: &str) -> Result<NaiveDateTime, DbError> {
    NaiveDateTime::parse_from_str(value, CLOCK_FORMAT).map_err(|e| DbError::InvalidStoredValue {
        key: key.to_string(),
        message: format!("clock time {value}: {e}"),
    })
}

fn parse_timestamp(value: &str, key: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidStoredValue {
            key: key.to_string(),
            message: format!("timestamp {value}: {e}"),
        })
}
