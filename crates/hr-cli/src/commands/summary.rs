//! Summary command: today's and this period's attendance counters.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use hr_core::{Dashboard, MetricsSnapshot, Resolver, Scope, WindowKind, dashboard};
use hr_db::Database;

use super::list::scope;
use super::util::now_local;

#[derive(Debug, Serialize)]
struct SummaryJson<'a> {
    scope: String,
    date: NaiveDate,
    period: WindowKind,
    today: CardJson<'a>,
    this_period: CardJson<'a>,
}

#[derive(Debug, Serialize)]
struct CardJson<'a> {
    #[serde(flatten)]
    counters: &'a MetricsSnapshot,
    attendance_rate: f64,
}

impl<'a> CardJson<'a> {
    fn new(counters: &'a MetricsSnapshot) -> Self {
        Self {
            counters,
            attendance_rate: counters.attendance_rate(),
        }
    }
}

/// Formats a 0..=1 rate as a percentage with one decimal.
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

fn scope_label(scope: &Scope) -> String {
    match scope {
        Scope::Employee(id) => id.to_string(),
        Scope::All => "everyone".to_string(),
    }
}

fn period_label(kind: WindowKind, date: NaiveDate) -> String {
    match kind {
        WindowKind::Day => format!("Day {date}"),
        WindowKind::Month => format!("Month {}", date.format("%Y-%m")),
        WindowKind::Year => format!("Year {}", date.format("%Y")),
    }
}

fn format_card(out: &mut String, title: &str, counters: &MetricsSnapshot) {
    writeln!(out, "{title}").unwrap();
    writeln!(
        out,
        "  Present     {:>4}  (on time {}, late {}, permission {}, half day {})",
        counters.total_present,
        counters.on_time,
        counters.late,
        counters.permission,
        counters.half_day
    )
    .unwrap();
    writeln!(out, "  Absent      {:>4}", counters.absent).unwrap();
    writeln!(out, "  Leave       {:>4}", counters.leave).unwrap();
    writeln!(out, "  Holiday     {:>4}", counters.holiday).unwrap();
    writeln!(out, "  Working     {:>4}", counters.working_days).unwrap();
    writeln!(
        out,
        "  Rate      {:>6}",
        format_rate(counters.attendance_rate())
    )
    .unwrap();
}

/// Renders the dashboard as text.
pub fn format_summary(scope: &Scope, date: NaiveDate, data: &Dashboard) -> String {
    let mut out = String::new();
    writeln!(out, "Attendance for {}", scope_label(scope)).unwrap();
    writeln!(out).unwrap();
    format_card(&mut out, &format!("Today {date}"), &data.today);
    writeln!(out).unwrap();
    format_card(
        &mut out,
        &period_label(data.period_window.kind, date),
        &data.period,
    );
    out
}

pub fn format_summary_json(scope: &Scope, date: NaiveDate, data: &Dashboard) -> Result<String> {
    let summary = SummaryJson {
        scope: scope_label(scope),
        date,
        period: data.period_window.kind,
        today: CardJson::new(&data.today),
        this_period: CardJson::new(&data.period),
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}

fn build(
    db: &Database,
    resolver: &Resolver,
    scope: &Scope,
    date: NaiveDate,
    period: WindowKind,
) -> Result<Dashboard> {
    let window = hr_core::Window {
        kind: period,
        anchor: date,
    };
    let (first, last) = window.bounds();
    let ledger = db.load_ledger(first, last)?;
    Ok(dashboard(resolver, &ledger, scope, date, period))
}

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    resolver: &Resolver,
    employee: Option<&str>,
    date: Option<NaiveDate>,
    year: bool,
    json: bool,
) -> Result<()> {
    let scope = scope(db, employee)?;
    let date = date.unwrap_or_else(|| now_local().date());
    let period = if year {
        WindowKind::Year
    } else {
        WindowKind::Month
    };
    let data = build(db, resolver, &scope, date, period)?;

    if json {
        writeln!(writer, "{}", format_summary_json(&scope, date, &data)?)?;
    } else {
        write!(writer, "{}", format_summary(&scope, date, &data))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use hr_core::{
        Employee, EmployeeId, HolidayCalendar, HolidayEntry, OverrideStatus, WeekendPolicy,
        WorkMode,
    };
    use hr_db::ClockOrigin;
    use insta::assert_snapshot;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    /// Three employees on Monday 2024-03-04: one on time, one late, one on
    /// leave. Friday 2024-03-08 is a holiday.
    fn setup() -> (Database, Resolver) {
        let mut db = Database::open_in_memory().unwrap();
        for id in ["EMP-1", "EMP-2", "EMP-3"] {
            db.add_employee(&Employee {
                id: EmployeeId::new(id).unwrap(),
                name: id.to_lowercase(),
                work_mode: WorkMode::Hybrid,
            })
            .unwrap();
        }
        let origin = ClockOrigin::self_service("Web");
        let day = date(3, 4);
        db.clock_in(
            &EmployeeId::new("EMP-1").unwrap(),
            day,
            day.and_hms_opt(8, 50, 0).unwrap(),
            &origin,
        )
        .unwrap();
        db.clock_in(
            &EmployeeId::new("EMP-2").unwrap(),
            day,
            day.and_hms_opt(9, 20, 0).unwrap(),
            &origin,
        )
        .unwrap();
        db.mark(
            &EmployeeId::new("EMP-3").unwrap(),
            day,
            OverrideStatus::Leave,
            Some("Medical"),
            None,
        )
        .unwrap();

        let resolver = Resolver::new(
            HolidayCalendar::new(
                [HolidayEntry {
                    date: date(3, 8),
                    name: "Founders Day".to_string(),
                }],
                WeekendPolicy::default(),
            ),
            hr_core::DEFAULT_ON_TIME_CUTOFF,
        );
        (db, resolver)
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(2.0 / 3.0), "66.7%");
        assert_eq!(format_rate(0.0), "0.0%");
        assert_eq!(format_rate(1.0), "100.0%");
    }

    #[test]
    fn test_summary_for_everyone() {
        let (db, resolver) = setup();
        let data = build(&db, &resolver, &Scope::All, date(3, 4), WindowKind::Month).unwrap();

        assert_eq!(data.today.total_present, 2);
        assert_eq!(data.today.working_days, 3);
        assert_eq!(data.period.holiday, 3);
        assert_eq!(data.period.working_days, 3);

        let output = format_summary(&Scope::All, date(3, 4), &data);
        assert_snapshot!(output, @r"
Attendance for everyone

Today 2024-03-04
  Present        2  (on time 1, late 1, permission 0, half day 0)
  Absent         0
  Leave          1
  Holiday        0
  Working        3
  Rate       66.7%

Month 2024-03
  Present        2  (on time 1, late 1, permission 0, half day 0)
  Absent         0
  Leave          1
  Holiday        3
  Working        3
  Rate       66.7%
");
    }

    #[test]
    fn test_summary_json_for_one_employee() {
        let (db, resolver) = setup();
        let scope = Scope::Employee(EmployeeId::new("EMP-2").unwrap());
        let data = build(&db, &resolver, &scope, date(3, 4), WindowKind::Year).unwrap();

        let output = format_summary_json(&scope, date(3, 4), &data).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["scope"], "EMP-2");
        assert_eq!(parsed["period"], "year");
        assert_eq!(parsed["today"]["late"], 1);
        assert_eq!(parsed["today"]["attendance_rate"], 1.0);
        assert_eq!(parsed["this_period"]["holiday"], 1);
    }

    #[test]
    fn test_summary_with_no_working_days() {
        let (db, resolver) = setup();
        // 2024-03-09 is a Saturday
        let data = build(&db, &resolver, &Scope::All, date(3, 9), WindowKind::Month).unwrap();
        assert_eq!(data.today, MetricsSnapshot::default());
        assert!(format_summary(&Scope::All, date(3, 9), &data).contains("Rate        0.0%"));
    }
}
