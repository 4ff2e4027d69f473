//! Record service
//!
//! Orchestrates the validator, the bounded cache and the repository to give
//! consistent player CRUD. Per-key states:
//!
//! - Absent (initial and terminal)
//! - PersistedOnly
//! - PersistedAndCached
//!
//! A cached-but-not-persisted state never arises: the cache is only filled
//! from values the repository returned.

mod errors;
mod player_service;

pub use errors::{ServiceError, ServiceResult};
pub use player_service::{DeleteMode, PlayerService};
