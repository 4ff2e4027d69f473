//! Persistent player repository
//!
//! The repository is the source of truth for every player. Its contract
//! reports failure as absence: every operation returns `None` (or an empty
//! list) instead of an error, and implementations log the underlying cause
//! themselves. Callers cannot tell a storage outage from a missing row.
//!
//! Two implementations ship with the crate:
//!
//! - [`SqlitePlayerRepository`], backed by a `players` table
//! - [`MemoryPlayerRepository`], a map-backed store for tests and dry runs

mod errors;
mod memory;
mod sqlite;

pub use errors::{RepositoryError, RepositoryResult};
pub use memory::MemoryPlayerRepository;
pub use sqlite::SqlitePlayerRepository;

use crate::player::Player;

/// CRUD by integer key against durable storage
pub trait PlayerRepository: Send + Sync {
    /// Insert a player, ignoring its id. Returns the stored row with the
    /// assigned id and fresh timestamps.
    fn create(&self, player: &Player) -> Option<Player>;

    /// Fetch a row by id, soft-deleted rows included
    fn get(&self, id: i64) -> Option<Player>;

    /// Overwrite the mutable fields of an existing row and refresh
    /// `updated_at`. Returns the stored row, or `None` if no row matched.
    fn update(&self, player: &Player) -> Option<Player>;

    /// Mark (`logical`) or remove the row. Returns the row as it was before
    /// deletion, flagged as deleted, or `None` if no row matched.
    fn delete(&self, id: i64, logical: bool) -> Option<Player>;

    /// Every row, soft-deleted ones included, ordered by id
    fn get_all(&self) -> Vec<Player>;
}
