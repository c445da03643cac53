use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hr_cli::commands::{
    calendar, clock, employee, holiday, import, list, overrides, status, summary, watch,
};
use hr_cli::{Cli, Commands, Config, EmployeeAction, HolidayAction};
use hr_core::Resolver;
use hr_db::Database;

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

/// Builds the resolver from stored holidays and the configured policies.
fn resolver(db: &Database, config: &Config) -> Result<Resolver> {
    let weekend = config
        .weekend_policy()
        .context("invalid weekend_days in configuration")?;
    let cutoff = config
        .cutoff()
        .context("invalid on_time_cutoff in configuration")?;
    let calendar = db
        .holiday_calendar(weekend)
        .context("failed to load holidays")?;
    Ok(Resolver::new(calendar, cutoff))
}

#[expect(
    clippy::too_many_lines,
    reason = "CLI command dispatch is inherently verbose"
)]
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut db, config) = open_database(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Employee(action) => match action {
            EmployeeAction::Add { id, name, mode } => {
                employee::add(&mut out, &mut db, id, name, *mode)?;
            }
            EmployeeAction::List { json } => employee::list(&mut out, &db, *json)?,
        },
        Commands::Holiday(action) => match action {
            HolidayAction::Add { date, name } => {
                holiday::add(&mut out, &mut db, *date, &name.join(" "))?;
            }
            HolidayAction::Remove { date } => holiday::remove(&mut out, &mut db, *date)?,
            HolidayAction::List { year, json } => holiday::list(&mut out, &db, *year, *json)?,
        },
        Commands::ClockIn {
            employee,
            clock,
            channel,
        } => {
            let resolver = resolver(&db, &config)?;
            clock::clock_in(&mut out, &mut db, &resolver, employee, clock, channel)?;
        }
        Commands::ClockOut { employee, clock } => {
            clock::clock_out(&mut out, &mut db, employee, clock)?;
        }
        Commands::Override {
            record,
            status,
            reason,
            notes,
        } => {
            let resolver = resolver(&db, &config)?;
            overrides::override_status(
                &mut out,
                &mut db,
                &resolver,
                record,
                *status,
                reason.as_deref(),
                notes.as_deref(),
            )?;
        }
        Commands::ClearOverride { record } => {
            let resolver = resolver(&db, &config)?;
            overrides::clear(&mut out, &mut db, &resolver, record)?;
        }
        Commands::Mark {
            employee,
            date,
            status,
            reason,
            notes,
        } => {
            let resolver = resolver(&db, &config)?;
            overrides::mark(
                &mut out,
                &mut db,
                &resolver,
                employee,
                *date,
                *status,
                reason.as_deref(),
                notes.as_deref(),
            )?;
        }
        Commands::Import => {
            import::run(&mut out, &mut db)?;
        }
        Commands::Status {
            employee,
            date,
            at,
            json,
        } => {
            let resolver = resolver(&db, &config)?;
            status::run(&mut out, &db, &resolver, employee, *date, *at, *json)?;
        }
        Commands::List {
            employee,
            month,
            json,
        } => {
            let resolver = resolver(&db, &config)?;
            list::run(&mut out, &db, &resolver, employee.as_deref(), *month, *json)?;
        }
        Commands::Calendar {
            employee,
            month,
            json,
        } => {
            let resolver = resolver(&db, &config)?;
            calendar::run(&mut out, &db, &resolver, employee, *month, *json)?;
        }
        Commands::Summary {
            employee,
            date,
            year,
            json,
        } => {
            let resolver = resolver(&db, &config)?;
            summary::run(
                &mut out,
                &db,
                &resolver,
                employee.as_deref(),
                *date,
                *year,
                *json,
            )?;
        }
        Commands::Watch { employee, date } => {
            let resolver = resolver(&db, &config)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            runtime.block_on(watch::run(&mut out, db, resolver, employee, *date))?;
        }
    }

    Ok(())
}
