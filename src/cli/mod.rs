//! CLI module for rosterdb
//!
//! Provides command-line interface for:
//! - import: Load a CSV, JSON or XML file into the database
//! - export: Write every active player to a file
//! - list: Print every active player
//! - get: Print one player
//! - delete: Delete one player

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_service, execute, resolve_format, run, run_command, CliService};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
