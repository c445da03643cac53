//! HR attendance CLI library.
//!
//! This crate provides the `hr` command-line interface on top of the
//! attendance engine and its `SQLite` store.

mod cli;
pub mod commands;
mod config;

pub use cli::{ClockArgs, Cli, Commands, EmployeeAction, HolidayAction};
pub use config::Config;
