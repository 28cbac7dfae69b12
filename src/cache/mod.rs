//! Cache Module
//!
//! Provides an in-memory key-value store with per-entry TTL, lazy expiry
//! eviction, and JSON snapshot load/serialize.

mod clock;
mod contract;
mod entry;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use contract::SimpleCache;
pub use entry::Entry;
pub use stats::CacheStats;
pub use store::Store;
pub use ttl::Ttl;
