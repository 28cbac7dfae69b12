//! Cache Store Module
//!
//! Main cache engine: a HashMap of expiry-aware entries with point and bulk
//! operations, seeded from and serialized to JSON snapshots.

use std::collections::HashMap;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cache::{CacheStats, Clock, Entry, SystemClock, Ttl};
use crate::error::Result;

// == Cache Store ==
/// In-memory key-value store with per-entry TTL.
///
/// Expired entries are evicted lazily: `has` (and therefore `get`) removes
/// an expired entry when it finds one. `snapshot` and `Serialize` only skip
/// expired entries and leave the mapping untouched. `purge_expired` sweeps
/// everything at once.
///
/// The store holds no locks. Hosts sharing it across tasks wrap it in their
/// own lock (see `tasks::spawn_purge_task`).
#[derive(Debug, Clone)]
pub struct Store<C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, Entry>,
    /// Time source for TTLs and expiry checks
    clock: C,
    /// Lookup statistics
    stats: CacheStats,
}

impl Store<SystemClock> {
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Seeds a store from an already-decoded snapshot.
    pub fn from_snapshot(snapshot: Map<String, Value>) -> Self {
        Self::from_snapshot_with_clock(snapshot, SystemClock)
    }

    /// Seeds a store from snapshot text.
    ///
    /// Fails with `CacheError::Parse` if the text is not valid JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_json_with_clock(text, SystemClock)
    }
}

impl Default for Store<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Store<C> {
    // == Constructors ==
    /// Creates an empty store on the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
            stats: CacheStats::new(),
        }
    }

    /// Seeds a store from an already-decoded snapshot.
    ///
    /// Each value may be a raw payload (kept forever) or a
    /// `{data, expires}` object. Entries that have already expired are
    /// dropped.
    pub fn from_snapshot_with_clock(snapshot: Map<String, Value>, clock: C) -> Self {
        let mut store = Self::with_clock(clock);
        let total = snapshot.len();

        for (key, loaded) in snapshot {
            let entry = Entry::from_loaded(loaded);
            if !entry.is_expired(&store.clock) {
                store.entries.insert(key, entry);
            }
        }

        debug!(
            "Loaded {} entries from snapshot, dropped {} expired",
            store.entries.len(),
            total - store.entries.len()
        );
        store.sync_entry_count();
        store
    }

    /// Seeds a store from snapshot text.
    ///
    /// Malformed text fails with `CacheError::Parse`. Valid JSON that is not
    /// an object yields an empty store.
    pub fn from_json_with_clock(text: &str, clock: C) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(snapshot) => Ok(Self::from_snapshot_with_clock(snapshot, clock)),
            other => {
                warn!(
                    "Snapshot is a JSON {}, not an object; starting empty",
                    json_kind(&other)
                );
                Ok(Self::with_clock(clock))
            }
        }
    }

    /// Returns the store's clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // == Has ==
    /// Checks whether `key` holds a live entry.
    ///
    /// An expired entry found here is removed as a side effect.
    pub fn has(&mut self, key: &str) -> bool {
        let expired = match self.entries.get(key) {
            None => return false,
            Some(entry) => entry.is_expired(&self.clock),
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.sync_entry_count();
            debug!("Evicted expired key '{}'", key);
            return false;
        }
        true
    }

    // == Get ==
    /// Returns the live value for `key`, or `default`.
    pub fn get(&mut self, key: &str, default: Value) -> Value {
        if !self.has(key) {
            self.stats.record_miss();
            return default;
        }

        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                entry.get(default, &self.clock)
            }
            None => default,
        }
    }

    /// Looks up every key independently.
    ///
    /// Output follows input order; a repeated key keeps its last result.
    pub fn get_multiple<K: AsRef<str>>(
        &mut self,
        keys: &[K],
        default: Value,
    ) -> Map<String, Value> {
        let mut out = Map::with_capacity(keys.len());
        for key in keys {
            let key = key.as_ref();
            let value = self.get(key, default.clone());
            out.insert(key.to_string(), value);
        }
        out
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and its TTL.
    ///
    /// Always returns `true`.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        ttl: Option<Ttl>,
    ) -> bool {
        let entry = Entry::with_ttl(value.into(), ttl, &self.clock);
        self.entries.insert(key.into(), entry);
        self.sync_entry_count();
        true
    }

    /// Stores every pair with the same TTL.
    ///
    /// Returns `true` only if every individual set succeeded.
    pub fn set_multiple<I, K, V>(&mut self, values: I, ttl: Option<Ttl>) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut ok = true;
        for (key, value) in values {
            ok = self.set(key, value, ttl) && ok;
        }
        ok
    }

    // == Delete ==
    /// Removes `key`. Deleting a missing key still succeeds.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key);
        self.sync_entry_count();
        true
    }

    /// Removes every key in `keys`. Returns `true` only if every delete succeeded.
    pub fn delete_multiple<I, K>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut ok = true;
        for key in keys {
            ok = self.delete(key.as_ref()) && ok;
        }
        ok
    }

    // == Clear ==
    /// Removes every entry. Always returns `true`.
    pub fn clear(&mut self) -> bool {
        self.entries.clear();
        self.sync_entry_count();
        true
    }

    // == Snapshot ==
    /// Returns the live entries in their `{data, expires}` shape.
    ///
    /// Expired entries are skipped but not evicted.
    pub fn snapshot(&self) -> Map<String, Value> {
        let now = self.clock.now();
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, entry)| (key.clone(), entry.to_loaded()))
            .collect()
    }

    /// Returns the snapshot as JSON text.
    pub fn to_json(&self) -> String {
        Value::Object(self.snapshot()).to_string()
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.sync_entry_count();
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    // == Length ==
    /// Returns the number of entries held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sync_entry_count(&mut self) {
        self.stats.set_total_entries(self.entries.len());
    }
}

impl From<Map<String, Value>> for Store<SystemClock> {
    fn from(snapshot: Map<String, Value>) -> Self {
        Self::from_snapshot(snapshot)
    }
}

impl FromStr for Store<SystemClock> {
    type Err = crate::error::CacheError;

    fn from_str(text: &str) -> Result<Self> {
        Self::from_json(text)
    }
}

impl<C: Clock> Serialize for Store<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let now = self.clock.now();
        let live: Vec<(&String, &Entry)> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .collect();

        let mut map = serializer.serialize_map(Some(live.len()))?;
        for (key, entry) in live {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
