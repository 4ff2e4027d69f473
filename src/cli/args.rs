//! CLI argument definitions using clap
//!
//! Commands:
//! - rosterdb import <file> [--format csv|json|xml]
//! - rosterdb export <file> [--format csv|json|xml]
//! - rosterdb list
//! - rosterdb get <id>
//! - rosterdb delete <id>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::codec::Format;

/// rosterdb - player records with CSV, JSON and XML interchange
#[derive(Parser, Debug)]
#[command(name = "rosterdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./rosterdb.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import players from a file and save each one
    Import {
        /// Source file
        file: PathBuf,

        /// File format; inferred from the extension if omitted
        #[arg(long)]
        format: Option<Format>,
    },

    /// Export every active player to a file
    Export {
        /// Target file
        file: PathBuf,

        /// File format; inferred from the extension if omitted
        #[arg(long)]
        format: Option<Format>,
    },

    /// List every active player
    List,

    /// Show one player
    Get {
        /// Player id
        id: i64,
    },

    /// Delete one player
    Delete {
        /// Player id
        id: i64,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
