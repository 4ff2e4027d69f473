//! SQLite-backed player repository
//!
//! Table contract:
//!
//! ```text
//! players(
//!     id            INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name          TEXT NOT NULL,
//!     country       TEXT NOT NULL,
//!     weight        INTEGER NOT NULL,
//!     height        REAL NOT NULL,
//!     dominant_hand TEXT NOT NULL,
//!     points        INTEGER NOT NULL,
//!     birth_date    TEXT NOT NULL,   -- YYYY-MM-DD
//!     created_at    TEXT NOT NULL,   -- YYYY-MM-DDTHH:MM:SS[.f]
//!     updated_at    TEXT NOT NULL,
//!     is_deleted    INTEGER NOT NULL DEFAULT 0
//! )
//! ```
//!
//! The connection sits behind a `Mutex`; SQLite does its own file locking.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, error, info};

use super::{PlayerRepository, RepositoryError, RepositoryResult};
use crate::player::{self, Handedness, Player, DATE_FORMAT};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS players (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    country       TEXT NOT NULL,
    weight        INTEGER NOT NULL,
    height        REAL NOT NULL,
    dominant_hand TEXT NOT NULL,
    points        INTEGER NOT NULL,
    birth_date    TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL,
    is_deleted    INTEGER NOT NULL DEFAULT 0
);";

const SELECT_COLUMNS: &str = "SELECT id, name, country, weight, height, dominant_hand, points, \
     birth_date, created_at, updated_at, is_deleted FROM players";

/// Player repository over a single SQLite connection
pub struct SqlitePlayerRepository {
    conn: Mutex<Connection>,
}

impl SqlitePlayerRepository {
    /// Open (or create) a database file
    pub fn open(path: &Path) -> RepositoryResult<Self> {
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened player database");
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database
    pub fn in_memory() -> RepositoryResult<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    /// Wrap an already-open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Create the `players` table if it does not exist
    pub fn init_schema(&self) -> RepositoryResult<()> {
        self.connection()?.execute_batch(SCHEMA)?;
        info!("player table ready");
        Ok(())
    }

    /// Delete every row. Returns the number of rows removed.
    pub fn remove_all(&self) -> RepositoryResult<usize> {
        let removed = self.connection()?.execute("DELETE FROM players", [])?;
        info!(removed, "removed all players");
        Ok(removed)
    }

    fn connection(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepositoryError::LockPoisoned)
    }

    fn try_create(&self, player: &Player) -> RepositoryResult<Option<Player>> {
        let conn = self.connection()?;
        let stamp = player::format_date_time(&player::now());
        conn.execute(
            "INSERT INTO players (name, country, weight, height, dominant_hand, points, \
             birth_date, created_at, updated_at, is_deleted) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0)",
            params![
                player.name,
                player.country,
                player.weight,
                player.height,
                player.dominant_hand.as_token(),
                player.points,
                player.birth_date.format(DATE_FORMAT).to_string(),
                stamp,
                stamp,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(fetch(&conn, id)?)
    }

    fn try_update(&self, player: &Player) -> RepositoryResult<Option<Player>> {
        let conn = self.connection()?;
        let changed = conn.execute(
            "UPDATE players SET name = ?1, country = ?2, weight = ?3, height = ?4, \
             dominant_hand = ?5, points = ?6, birth_date = ?7, updated_at = ?8 WHERE id = ?9",
            params![
                player.name,
                player.country,
                player.weight,
                player.height,
                player.dominant_hand.as_token(),
                player.points,
                player.birth_date.format(DATE_FORMAT).to_string(),
                player::format_date_time(&player::now()),
                player.id,
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(fetch(&conn, player.id)?)
    }

    fn try_delete(&self, id: i64, logical: bool) -> RepositoryResult<Option<Player>> {
        let conn = self.connection()?;
        let Some(mut existing) = fetch(&conn, id)? else {
            return Ok(None);
        };

        if logical {
            let stamp = player::now();
            conn.execute(
                "UPDATE players SET is_deleted = 1, updated_at = ?1 WHERE id = ?2",
                params![player::format_date_time(&stamp), id],
            )?;
            existing.updated_at = stamp;
        } else {
            conn.execute("DELETE FROM players WHERE id = ?1", params![id])?;
        }
        existing.is_deleted = true;
        Ok(Some(existing))
    }

    fn try_get_all(&self) -> RepositoryResult<Vec<Player>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let rows = stmt.query_map([], row_to_player)?;
        let players = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(players)
    }
}

impl PlayerRepository for SqlitePlayerRepository {
    fn create(&self, player: &Player) -> Option<Player> {
        debug!(name = %player.name, "inserting player");
        self.try_create(player).unwrap_or_else(|e| {
            error!(name = %player.name, error = %e, "failed to insert player");
            None
        })
    }

    fn get(&self, id: i64) -> Option<Player> {
        debug!(id, "fetching player");
        self.connection()
            .and_then(|conn| Ok(fetch(&conn, id)?))
            .unwrap_or_else(|e| {
                error!(id, error = %e, "failed to fetch player");
                None
            })
    }

    fn update(&self, player: &Player) -> Option<Player> {
        debug!(id = player.id, "updating player");
        self.try_update(player).unwrap_or_else(|e| {
            error!(id = player.id, error = %e, "failed to update player");
            None
        })
    }

    fn delete(&self, id: i64, logical: bool) -> Option<Player> {
        debug!(id, logical, "deleting player");
        self.try_delete(id, logical).unwrap_or_else(|e| {
            error!(id, error = %e, "failed to delete player");
            None
        })
    }

    fn get_all(&self) -> Vec<Player> {
        debug!("fetching all players");
        self.try_get_all().unwrap_or_else(|e| {
            error!(error = %e, "failed to fetch players");
            Vec::new()
        })
    }
}

fn fetch(conn: &Connection, id: i64) -> rusqlite::Result<Option<Player>> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE id = ?1"),
        params![id],
        row_to_player,
    )
    .optional()
}

fn row_to_player(row: &Row<'_>) -> rusqlite::Result<Player> {
    let hand: String = row.get(5)?;
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        country: row.get(2)?,
        weight: row.get(3)?,
        height: row.get(4)?,
        dominant_hand: Handedness::from_token(&hand),
        points: row.get(6)?,
        birth_date: text_column(row, 7, player::parse_date)?,
        created_at: text_column(row, 8, player::parse_date_time)?,
        updated_at: text_column(row, 9, player::parse_date_time)?,
        is_deleted: row.get(10)?,
    })
}

fn text_column<T>(
    row: &Row<'_>,
    idx: usize,
    parse: fn(&str) -> chrono::ParseResult<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    parse(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
