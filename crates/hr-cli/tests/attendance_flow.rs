//! End-to-end tests driving the `hr` binary against a temporary database.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::{NamedTempFile, TempDir};

fn hr_binary() -> String {
    env!("CARGO_BIN_EXE_hr").to_string()
}

/// A temp home, database and config file for one test.
struct Env {
    home: TempDir,
    config: NamedTempFile,
}

impl Env {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let db_path = home.path().join("hr.db");
        let mut config = NamedTempFile::new().unwrap();
        writeln!(config, r#"database_path = "{}""#, db_path.display()).unwrap();
        writeln!(config, r#"on_time_cutoff = "09:00""#).unwrap();
        config.flush().unwrap();
        Self { home, config }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(hr_binary());
        cmd.env("HOME", self.home.path())
            .env_remove("HR_DATABASE_PATH")
            .env_remove("HR_ON_TIME_CUTOFF")
            .env_remove("HR_WEEKEND_DAYS")
            .arg("--config")
            .arg(self.config.path());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }

    /// Runs a command that must succeed and returns its stdout.
    fn ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "hr {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        serde_json::from_str(&self.ok(args)).unwrap()
    }

    fn import(&self, input: &str) -> Output {
        let mut child = self
            .command()
            .arg("import")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }
}

fn roster(env: &Env) {
    env.ok(&["employee", "add", "EMP-1", "--name", "Ada", "--mode", "remote"]);
    env.ok(&["employee", "add", "EMP-2", "--name", "Bea", "--mode", "hybrid"]);
    env.ok(&["employee", "add", "EMP-3", "--name", "Cy", "--mode", "office"]);
}

#[test]
fn test_help_without_subcommand() {
    let env = Env::new();
    let output = env.run(&[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("clock-in"));
}

#[test]
fn test_clock_in_out_and_status() {
    let env = Env::new();
    roster(&env);

    let out = env.ok(&["clock-in", "EMP-1", "--at", "2024-03-04T09:15:00"]);
    assert!(out.contains("Status: Late"), "{out}");

    let out = env.ok(&["clock-in", "EMP-2", "--at", "2024-03-04T08:55:00"]);
    assert!(out.contains("Status: Present"), "{out}");

    let status = env.json(&[
        "status",
        "EMP-1",
        "--date",
        "2024-03-04",
        "--at",
        "2024-03-04T10:00:05",
        "--json",
    ]);
    assert_eq!(status["session"], "open");
    assert_eq!(status["worked_seconds"], 2705);

    let out = env.ok(&["clock-out", "EMP-1", "--at", "2024-03-04T18:00:00"]);
    assert!(out.contains("Worked: 08:45:00"), "{out}");

    let status = env.json(&["status", "EMP-1", "--date", "2024-03-04", "--json"]);
    assert_eq!(status["status"], "present_late");
    assert_eq!(status["session"], "closed");
    assert_eq!(status["worked_seconds"], 31_500);
}

#[test]
fn test_overnight_session_closes_without_date() {
    let env = Env::new();
    roster(&env);

    env.ok(&["clock-in", "EMP-1", "--at", "2024-03-04T22:00:00"]);
    let out = env.ok(&["clock-out", "EMP-1", "--at", "2024-03-05T02:00:00"]);
    assert!(out.contains("for 2024-03-04"), "{out}");
    assert!(out.contains("Worked: 04:00:00"), "{out}");

    let status = env.json(&["status", "EMP-1", "--date", "2024-03-04", "--json"]);
    assert_eq!(status["session"], "closed");
    assert_eq!(status["worked_seconds"], 14_400);
}

#[test]
fn test_clock_errors() {
    let env = Env::new();
    roster(&env);

    env.ok(&["clock-in", "EMP-1", "--at", "2024-03-04T09:00:00"]);
    let output = env.run(&["clock-in", "EMP-1", "--at", "2024-03-04T09:05:00"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already clocked in"));

    let output = env.run(&["clock-out", "EMP-2", "--at", "2024-03-04T17:00:00"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not clocked in"));

    let output = env.run(&["clock-in", "EMP-3", "--at", "2024-03-04T09:00:00"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not available"));
    env.ok(&["clock-in", "EMP-3", "--at", "2024-03-04T09:00:00", "--admin"]);

    let output = env.run(&["clock-in", "EMP-404", "--at", "2024-03-04T09:00:00"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown employee"));
}

#[test]
fn test_override_after_closed_session() {
    let env = Env::new();
    roster(&env);

    env.ok(&["clock-in", "EMP-1", "--at", "2024-03-04T09:00:00"]);
    env.ok(&["clock-out", "EMP-1", "--at", "2024-03-04T18:00:00"]);
    let status = env.json(&["status", "EMP-1", "--date", "2024-03-04", "--json"]);
    assert_eq!(status["status"], "present_on_time");
    let record_id = status["record_id"].as_str().unwrap().to_string();

    let out = env.ok(&["override", &record_id, "leave", "--reason", "Medical"]);
    assert!(out.contains("Leave"), "{out}");

    let status = env.json(&["status", "EMP-1", "--date", "2024-03-04", "--json"]);
    assert_eq!(status["status"], "leave");
    assert_eq!(status["reason"], "Medical");

    env.ok(&["clear-override", &record_id]);
    let status = env.json(&["status", "EMP-1", "--date", "2024-03-04", "--json"]);
    assert_eq!(status["status"], "present_on_time");
}

#[test]
fn test_holiday_weekend_and_summary() {
    let env = Env::new();
    roster(&env);
    env.ok(&["holiday", "add", "2024-01-26", "Republic", "Day"]);

    // 2024-01-26 is a Friday
    let status = env.json(&["status", "EMP-2", "--date", "2024-01-26", "--json"]);
    assert_eq!(status["status"], "holiday");
    assert_eq!(status["label"], "Republic Day");

    // 2024-01-27 is a Saturday
    let status = env.json(&["status", "EMP-2", "--date", "2024-01-27", "--json"]);
    assert_eq!(status["status"], "weekend");

    env.ok(&["clock-in", "EMP-1", "--at", "2024-01-25T08:45:00"]);
    env.ok(&["clock-in", "EMP-2", "--at", "2024-01-25T09:30:00"]);
    env.ok(&["mark", "EMP-3", "2024-01-25", "absent"]);

    let summary = env.json(&["summary", "--date", "2024-01-25", "--json"]);
    assert_eq!(summary["today"]["on_time"], 1);
    assert_eq!(summary["today"]["late"], 1);
    assert_eq!(summary["today"]["absent"], 1);
    assert_eq!(summary["today"]["working_days"], 3);
    assert_eq!(summary["this_period"]["holiday"], 3);
    assert_eq!(summary["this_period"]["working_days"], 3);

    let out = env.ok(&["summary", "--date", "2024-01-25"]);
    assert!(out.contains("66.7%"), "{out}");

    let rows = env.json(&["list", "--month", "2024-01", "--json"]);
    let rows = rows.as_array().unwrap();
    // three records on the 25th plus the holiday for each employee
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[3]["label"], "Republic Day");
}

#[test]
fn test_import_reports_rejected_rows() {
    let env = Env::new();
    roster(&env);

    let input = [
        r#"{"employee_id":"EMP-1","date":"2024-03-04","clock_in":"08:50","clock_out":"17:10"}"#,
        r#"{"employee_id":"EMP-2","date":"2024-03-04","status":"permission"}"#,
        r#"{"employee_id":"EMP-9","date":"2024-03-04","status":"leave"}"#,
        r#"{"employee_id":"EMP-3","date":"2024-03-04","clock_out":"17:00"}"#,
        "{not json",
    ]
    .join("\n");

    let output = env.import(&input);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Imported 2 rows, 3 rejected"), "{stdout}");

    let status = env.json(&["status", "EMP-2", "--date", "2024-03-04", "--json"]);
    assert_eq!(status["status"], "permission");
    assert_eq!(status["channel"], "Import");
}

#[test]
fn test_watch_without_open_session() {
    let env = Env::new();
    roster(&env);

    let out = env.ok(&["watch", "EMP-1", "--date", "2024-03-04"]);
    assert_eq!(out, "No open session for EMP-1 on 2024-03-04\n");
}
