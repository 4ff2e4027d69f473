//! Map-backed player repository
//!
//! Same contract as the SQLite repository, without durability. Ids start at
//! 1 and are never reused.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::debug;

use super::PlayerRepository;
use crate::player::{self, Player};

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<i64, Player>,
    last_id: i64,
}

/// In-memory player repository
#[derive(Debug, Default)]
pub struct MemoryPlayerRepository {
    state: Mutex<MemoryState>,
}

impl MemoryPlayerRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, soft-deleted ones included
    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.rows.len()).unwrap_or(0)
    }

    /// True if no rows are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlayerRepository for MemoryPlayerRepository {
    fn create(&self, player: &Player) -> Option<Player> {
        let mut state = self.state.lock().ok()?;
        state.last_id += 1;

        let stamp = player::now();
        let mut stored = player.clone();
        stored.id = state.last_id;
        stored.created_at = stamp;
        stored.updated_at = stamp;
        stored.is_deleted = false;

        debug!(id = stored.id, "inserted player in memory");
        state.rows.insert(stored.id, stored.clone());
        Some(stored)
    }

    fn get(&self, id: i64) -> Option<Player> {
        self.state.lock().ok()?.rows.get(&id).cloned()
    }

    fn update(&self, player: &Player) -> Option<Player> {
        let mut state = self.state.lock().ok()?;
        let row = state.rows.get_mut(&player.id)?;

        row.name = player.name.clone();
        row.country = player.country.clone();
        row.weight = player.weight;
        row.height = player.height;
        row.dominant_hand = player.dominant_hand;
        row.points = player.points;
        row.birth_date = player.birth_date;
        row.updated_at = player::now();
        Some(row.clone())
    }

    fn delete(&self, id: i64, logical: bool) -> Option<Player> {
        let mut state = self.state.lock().ok()?;
        if logical {
            let row = state.rows.get_mut(&id)?;
            row.is_deleted = true;
            row.updated_at = player::now();
            Some(row.clone())
        } else {
            let mut removed = state.rows.remove(&id)?;
            removed.is_deleted = true;
            Some(removed)
        }
    }

    fn get_all(&self) -> Vec<Player> {
        self.state
            .lock()
            .map(|s| s.rows.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Handedness;
    use chrono::NaiveDate;

    fn make_player(name: &str) -> Player {
        Player::new(
            name,
            "Serbia",
            77,
            188.0,
            Handedness::RightHanded,
            12030,
            NaiveDate::from_ymd_opt(1987, 5, 22).unwrap(),
        )
    }

    #[test]
    fn test_ids_are_not_reused() {
        let repo = MemoryPlayerRepository::new();
        let first = repo.create(&make_player("A")).unwrap();
        repo.delete(first.id, false).unwrap();
        let second = repo.create(&make_player("B")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_logical_delete_flags_row() {
        let repo = MemoryPlayerRepository::new();
        let created = repo.create(&make_player("A")).unwrap();
        assert!(repo.delete(created.id, true).unwrap().is_deleted);
        assert!(repo.get(created.id).unwrap().is_deleted);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_update_missing_is_none() {
        let repo = MemoryPlayerRepository::new();
        assert!(repo.update(&make_player("A").with_id(5)).is_none());
        assert!(repo.is_empty());
    }
}
