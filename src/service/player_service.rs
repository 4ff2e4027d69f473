//! Cache-aside player service
//!
//! Every mutation validates first, then checks existence against the cache
//! and the repository, then writes to the repository, and only then touches
//! the cache. The repository is the source of truth; the cache is
//! repopulated or invalidated after every successful write.
//!
//! The cache lock is held for the whole of each operation so that the
//! existence check and the write that follows it cannot interleave with
//! another caller.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error, warn};

use super::{ServiceError, ServiceResult};
use crate::cache::Cache;
use crate::player::Player;
use crate::repository::PlayerRepository;
use crate::validator::validate;

/// How `delete` removes rows from the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Set the soft-delete flag and keep the row
    #[default]
    Logical,
    /// Remove the row
    Physical,
}

impl DeleteMode {
    fn is_logical(self) -> bool {
        self == DeleteMode::Logical
    }
}

/// Player CRUD over a repository with a bounded cache in front
pub struct PlayerService<R, C> {
    repository: R,
    cache: Mutex<C>,
    delete_mode: DeleteMode,
}

impl<R, C> PlayerService<R, C>
where
    R: PlayerRepository,
    C: Cache<i64, Player>,
{
    /// Create a service that owns its repository and cache
    pub fn new(repository: R, cache: C) -> Self {
        Self {
            repository,
            cache: Mutex::new(cache),
            delete_mode: DeleteMode::default(),
        }
    }

    /// Choose logical or physical deletion
    pub fn with_delete_mode(mut self, delete_mode: DeleteMode) -> Self {
        self.delete_mode = delete_mode;
        self
    }

    /// The underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Persist a new player.
    ///
    /// Fails with `AlreadyExists` if the id is already cached or stored; this
    /// is not an upsert.
    pub fn save(&self, player: &Player) -> ServiceResult<Player> {
        debug!(id = player.id, name = %player.name, "saving player");
        if let Err(e) = validate(player) {
            warn!(id = player.id, error = %e, "rejected invalid player");
            return Err(e.into());
        }

        let mut cache = self.cache();
        if cache.get(&player.id).is_some() || self.repository.get(player.id).is_some() {
            warn!(id = player.id, "player already exists");
            return Err(ServiceError::AlreadyExists { id: player.id });
        }

        let Some(persisted) = self.repository.create(player) else {
            error!(name = %player.name, "repository did not store player");
            return Err(ServiceError::StorageFailure {
                id: player.id,
                operation: "create",
            });
        };

        cache.put(persisted.id, persisted.clone());
        Ok(persisted)
    }

    /// Look up an active player, filling the cache on a miss
    pub fn find_by_id(&self, id: i64) -> ServiceResult<Player> {
        debug!(id, "finding player");
        let mut cache = self.cache();
        if let Some(hit) = cache.get(&id) {
            return Ok(hit.clone());
        }

        match self.repository.get(id) {
            Some(found) if found.is_active() => {
                cache.put(found.id, found.clone());
                Ok(found)
            }
            _ => {
                warn!(id, "player not found");
                Err(ServiceError::DoesNotExist { id })
            }
        }
    }

    /// Replace an existing active player
    pub fn update(&self, player: &Player) -> ServiceResult<Player> {
        debug!(id = player.id, "updating player");
        if let Err(e) = validate(player) {
            warn!(id = player.id, error = %e, "rejected invalid player");
            return Err(e.into());
        }

        let mut cache = self.cache();
        if !self.exists(&*cache, player.id) {
            warn!(id = player.id, "cannot update missing player");
            return Err(ServiceError::DoesNotExist { id: player.id });
        }

        let Some(updated) = self.repository.update(player) else {
            error!(id = player.id, "repository did not update player");
            return Err(ServiceError::StorageFailure {
                id: player.id,
                operation: "update",
            });
        };

        cache.remove(&updated.id);
        cache.put(updated.id, updated.clone());
        Ok(updated)
    }

    /// Delete the given player
    pub fn delete(&self, player: &Player) -> ServiceResult<()> {
        self.delete_by_id(player.id)
    }

    /// Delete an active player by id.
    ///
    /// A key present in neither the cache nor the repository fails with
    /// `DoesNotExist` without issuing a repository delete.
    pub fn delete_by_id(&self, id: i64) -> ServiceResult<()> {
        debug!(id, mode = ?self.delete_mode, "deleting player");
        let mut cache = self.cache();
        if !self.exists(&*cache, id) {
            warn!(id, "cannot delete missing player");
            return Err(ServiceError::DoesNotExist { id });
        }

        if self
            .repository
            .delete(id, self.delete_mode.is_logical())
            .is_none()
        {
            error!(id, "repository did not delete player");
            return Err(ServiceError::StorageFailure {
                id,
                operation: "delete",
            });
        }

        cache.remove(&id);
        Ok(())
    }

    /// Every active player, straight from the repository
    pub fn find_all(&self) -> ServiceResult<Vec<Player>> {
        debug!("finding all players");
        Ok(self
            .repository
            .get_all()
            .into_iter()
            .filter(Player::is_active)
            .collect())
    }

    /// Drop every cached entry
    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    /// Number of cached entries
    pub fn cached_len(&self) -> usize {
        self.cache().len()
    }

    fn exists(&self, cache: &C, id: i64) -> bool {
        cache.get(&id).is_some()
            || self
                .repository
                .get(id)
                .is_some_and(|stored| stored.is_active())
    }

    fn cache(&self) -> MutexGuard<'_, C> {
        self.cache.lock().unwrap_or_else(|poisoned| {
            // A panic mid-operation may have left entries out of step with the repository
            warn!("cache lock poisoned; clearing cache");
            let mut cache = poisoned.into_inner();
            cache.clear();
            cache
        })
    }
}
