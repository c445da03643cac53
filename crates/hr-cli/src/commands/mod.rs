//! CLI subcommand implementations.

pub mod calendar;
pub mod clock;
pub mod employee;
pub mod holiday;
pub mod import;
pub mod list;
pub mod overrides;
pub mod status;
pub mod summary;
pub mod util;
pub mod watch;
