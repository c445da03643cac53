//! Live worked-time counter for an open session.
//!
//! A [`LiveTimer`] owns a background task that re-reads the session once per
//! second and publishes a [`Tick`]. The task ends on its own once the session
//! is no longer open, and is aborted when the timer is stopped or dropped, so
//! no update is delivered after the owner goes away.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use hr_core::{
    AttendanceRecord, EmployeeId, Resolver, SessionState, Status, elapsed_seconds, format_hms,
};
use hr_db::{Database, DbError};

use super::clock::session_date;
use super::util::{employee_id, now_local};

/// Update cadence of the live counter.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Where the timer reads the current session and wall-clock time from.
pub trait SessionSource: Send + 'static {
    fn current(&mut self) -> Result<Option<AttendanceRecord>, DbError>;

    fn now(&self) -> NaiveDateTime;
}

/// Reads the session from the store on every tick.
pub struct StoredSession {
    db: Database,
    employee_id: EmployeeId,
    date: NaiveDate,
}

impl StoredSession {
    pub const fn new(db: Database, employee_id: EmployeeId, date: NaiveDate) -> Self {
        Self {
            db,
            employee_id,
            date,
        }
    }
}

impl SessionSource for StoredSession {
    fn current(&mut self) -> Result<Option<AttendanceRecord>, DbError> {
        self.db.record(&self.employee_id, self.date)
    }

    fn now(&self) -> NaiveDateTime {
        now_local()
    }
}

/// One update of the live counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub elapsed_seconds: i64,
    pub display: String,
    pub status: Status,
    pub label: String,
    /// False on the final tick, after the session was closed.
    pub open: bool,
}

/// Handle to a running live counter.
pub struct LiveTimer {
    handle: Option<JoinHandle<()>>,
}

impl LiveTimer {
    /// Spawns the ticking task on the current runtime.
    pub fn start<S: SessionSource>(
        resolver: Resolver,
        date: NaiveDate,
        mut source: S,
    ) -> (Self, mpsc::Receiver<Tick>) {
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let record = match source.current() {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read session; stopping live timer");
                        break;
                    }
                };
                let session = SessionState::of(record.as_ref());
                let resolution = resolver.resolve(record.as_ref(), date);
                let elapsed = elapsed_seconds(session, source.now());
                let tick = Tick {
                    elapsed_seconds: elapsed,
                    display: format_hms(elapsed),
                    status: resolution.status,
                    label: resolution.display().to_string(),
                    open: session.is_open(),
                };
                let open = tick.open;
                if tx.send(tick).await.is_err() || !open {
                    break;
                }
            }
            tracing::debug!(%date, "live timer finished");
        });
        (
            Self {
                handle: Some(handle),
            },
            rx,
        )
    }

    /// Cancels the task and waits for it to wind down.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for LiveTimer {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

/// Runs `hr watch` until the session closes or Ctrl-C is pressed.
pub async fn run<W: Write>(
    writer: &mut W,
    db: Database,
    resolver: Resolver,
    employee: &str,
    date: Option<NaiveDate>,
) -> Result<()> {
    let employee_id = employee_id(employee)?;
    if db.employee(&employee_id)?.is_none() {
        return Err(DbError::UnknownEmployee(employee_id).into());
    }
    let date = match date {
        Some(date) => date,
        None => session_date(&db, &employee_id)?.unwrap_or_else(|| now_local().date()),
    };
    let is_open = db
        .record(&employee_id, date)?
        .is_some_and(|record| record.session().is_open());
    if !is_open {
        writeln!(writer, "No open session for {employee_id} on {date}")?;
        return Ok(());
    }

    let source = StoredSession::new(db, employee_id, date);
    let (timer, ticks) = LiveTimer::start(resolver, date, source);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    follow(writer, ticks, &mut ctrl_c).await?;
    timer.stop().await;
    Ok(())
}

/// Prints ticks until the channel closes or `cancel` resolves.
async fn follow<W, F>(writer: &mut W, mut ticks: mpsc::Receiver<Tick>, cancel: &mut F) -> Result<()>
where
    W: Write,
    F: std::future::Future + Unpin,
{
    loop {
        tokio::select! {
            tick = ticks.recv() => {
                let Some(tick) = tick else {
                    break;
                };
                write!(writer, "\r{}  {}", tick.display, tick.label)?;
                writer.flush()?;
                if !tick.open {
                    writeln!(writer)?;
                    writeln!(writer, "Session closed.")?;
                    break;
                }
            }
            _ = &mut *cancel => {
                writeln!(writer)?;
                break;
            }
        }
    }
    Ok(())
}
