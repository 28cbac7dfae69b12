//! Mini Cache - A lightweight in-process key-value cache
//!
//! Provides a simple cache contract with per-entry TTL, lazy expiry eviction,
//! and JSON snapshots that can seed a fresh store.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Clock, Entry, ManualClock, SimpleCache, Store, SystemClock, Ttl};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_purge_task;
