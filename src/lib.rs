//! rosterdb - player records behind a cache-aside service
//!
//! Layers, leaf-first:
//!
//! - [`player`]: the record model
//! - [`validator`]: field checks run before any mutation
//! - [`cache`]: bounded in-memory cache
//! - [`repository`]: the source of truth (SQLite, or in memory)
//! - [`service`]: keeps cache and repository consistent
//! - [`codec`]: CSV, JSON and XML import/export
//! - [`config`] and [`cli`]: the command line wiring

pub mod cache;
pub mod cli;
pub mod codec;
pub mod config;
pub mod player;
pub mod repository;
pub mod service;
pub mod validator;
