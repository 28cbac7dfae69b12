//! Simple Cache Contract
//!
//! The generic cache interface a pluggable backend implements.

use serde_json::{Map, Value};

use crate::cache::{Clock, Store, Ttl};

// == Simple Cache ==
/// A minimal cache contract: point and bulk get/set/delete, plus clear.
///
/// Every method takes `&mut self` because reads may evict expired entries.
/// Writes report success as a boolean; a backend may fail individual writes,
/// in which case the bulk variants return `false`.
pub trait SimpleCache {
    /// Removes every entry.
    fn clear(&mut self) -> bool;

    /// Removes `key`. Deleting a missing key is not an error.
    fn delete(&mut self, key: &str) -> bool;

    fn delete_multiple(&mut self, keys: &[&str]) -> bool;

    /// Returns the live value for `key`, or `default`.
    fn get(&mut self, key: &str, default: Value) -> Value;

    fn get_multiple(&mut self, keys: &[&str], default: Value) -> Map<String, Value>;

    /// Checks whether `key` holds a live value.
    fn has(&mut self, key: &str) -> bool;

    /// Stores `value` under `key`. `None` means the entry never expires.
    fn set(&mut self, key: &str, value: Value, ttl: Option<Ttl>) -> bool;

    fn set_multiple(&mut self, values: Map<String, Value>, ttl: Option<Ttl>) -> bool;
}

impl<C: Clock> SimpleCache for Store<C> {
    fn clear(&mut self) -> bool {
        Store::clear(self)
    }

    fn delete(&mut self, key: &str) -> bool {
        Store::delete(self, key)
    }

    fn delete_multiple(&mut self, keys: &[&str]) -> bool {
        Store::delete_multiple(self, keys)
    }

    fn get(&mut self, key: &str, default: Value) -> Value {
        Store::get(self, key, default)
    }

    fn get_multiple(&mut self, keys: &[&str], default: Value) -> Map<String, Value> {
        Store::get_multiple(self, keys, default)
    }

    fn has(&mut self, key: &str) -> bool {
        Store::has(self, key)
    }

    fn set(&mut self, key: &str, value: Value, ttl: Option<Ttl>) -> bool {
        Store::set(self, key, value, ttl)
    }

    fn set_multiple(&mut self, values: Map<String, Value>, ttl: Option<Ttl>) -> bool {
        Store::set_multiple(self, values, ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;

    fn exercise(cache: &mut dyn SimpleCache) {
        let mut values = Map::new();
        values.insert("a".to_string(), json!(1));
        values.insert("b".to_string(), json!(2));

        assert!(cache.set_multiple(values, None));
        assert!(cache.set("c", json!("three"), Some(Ttl::seconds(-1))));

        assert!(cache.has("a"));
        assert!(!cache.has("c"));
        assert_eq!(cache.get("b", Value::Null), json!(2));

        let out = cache.get_multiple(&["a", "c"], json!("none"));
        assert_eq!(out, json!({"a": 1, "c": "none"}).as_object().cloned().unwrap());

        assert!(cache.delete_multiple(&["a", "missing"]));
        assert!(!cache.has("a"));
        assert!(cache.delete("b"));
        assert!(cache.clear());
        assert!(!cache.has("b"));
    }

    #[test]
    fn test_store_behind_trait_object() {
        let mut store = Store::new();
        exercise(&mut store);
    }

    #[test]
    fn test_boxed_backend_with_manual_clock() {
        let clock = ManualClock::new(0.0);
        let mut cache: Box<dyn SimpleCache> = Box::new(Store::with_clock(clock.clone()));

        cache.set("k", json!("v"), Some(Ttl::seconds(60)));
        clock.advance(30.0);
        assert_eq!(cache.get("k", Value::Null), json!("v"));
        clock.advance(31.0);
        assert_eq!(cache.get("k", Value::Null), Value::Null);
    }
}
