//! Background Tasks Module
//!
//! Host-side helpers for stores shared across tokio tasks.
//!
//! # Tasks
//! - Expiry Purge: Removes expired entries at a fixed interval

mod purge;

pub use purge::spawn_purge_task;
