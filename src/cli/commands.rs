//! CLI command implementations
//!
//! Each invocation loads the configuration, opens the database, runs one
//! command and prints one JSON response. Nothing survives between
//! invocations except the database file itself.

use std::path::Path;

use serde_json::{json, Value};
use tracing::info;

use crate::cache::BoundedCache;
use crate::codec::{Format, ImportReport, PlayerStorage};
use crate::config::AppConfig;
use crate::player::Player;
use crate::repository::SqlitePlayerRepository;
use crate::service::PlayerService;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Service wiring used by the command line
pub type CliService = PlayerService<SqlitePlayerRepository, BoundedCache<i64, Player>>;

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}

/// Run one command and print its response.
///
/// Failures are printed as an error response and also returned, so the
/// process can exit non-zero.
pub fn run_command(cli: Cli) -> CliResult<()> {
    let result = AppConfig::load(&cli.config)
        .map_err(CliError::from)
        .and_then(|config| build_service(&config))
        .and_then(|service| execute(&service, &PlayerStorage::new(), cli.command));

    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Open the configured database and wrap it in a cached service
pub fn build_service(config: &AppConfig) -> CliResult<CliService> {
    let repository = if config.is_in_memory() {
        SqlitePlayerRepository::in_memory()?
    } else {
        SqlitePlayerRepository::open(Path::new(&config.database_path))?
    };

    if config.database_init {
        repository.init_schema()?;
    }
    if config.database_remove_data {
        let removed = repository.remove_all()?;
        info!(removed, "removed existing players");
    }

    info!(
        database = %config.database_path,
        cache_capacity = config.cache_capacity,
        delete_mode = ?config.delete_mode(),
        "service ready"
    );
    Ok(
        PlayerService::new(repository, BoundedCache::from_config(config.cache_capacity))
            .with_delete_mode(config.delete_mode()),
    )
}

/// Execute a command against a service, returning the response data
pub fn execute(
    service: &CliService,
    storage: &PlayerStorage,
    command: Command,
) -> CliResult<Value> {
    match command {
        Command::Import { file, format } => {
            let format = resolve_format(format, &file)?;
            let report = storage.import_into(service, format, &file)?;
            Ok(import_summary(format, &report))
        }
        Command::Export { file, format } => {
            let format = resolve_format(format, &file)?;
            let players = service.find_all()?;
            storage.export(format, &file, &players)?;
            Ok(json!({
                "format": format.to_string(),
                "path": file.display().to_string(),
                "exported": players.len(),
            }))
        }
        Command::List => Ok(serde_json::to_value(service.find_all()?)?),
        Command::Get { id } => Ok(serde_json::to_value(service.find_by_id(id)?)?),
        Command::Delete { id } => {
            service.delete_by_id(id)?;
            Ok(json!({ "deleted": id }))
        }
    }
}

/// Pick the explicit format, else the one implied by the file extension
pub fn resolve_format(explicit: Option<Format>, path: &Path) -> CliResult<Format> {
    explicit.or_else(|| Format::from_path(path)).ok_or_else(|| {
        CliError::unknown_format(format!(
            "cannot infer format of {}; pass --format csv|json|xml",
            path.display()
        ))
    })
}

fn import_summary(format: Format, report: &ImportReport) -> Value {
    let rejected: Vec<Value> = report
        .rejected
        .iter()
        .map(|r| {
            json!({
                "name": r.player.name,
                "code": r.error.code(),
                "message": r.error.to_string(),
            })
        })
        .collect();

    json!({
        "format": format.to_string(),
        "total": report.total(),
        "saved": report.saved,
        "rejected": rejected,
    })
}
