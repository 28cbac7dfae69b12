//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support, and
//! their `{data, expires}` snapshot shape.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cache::{Clock, Ttl};

/// Snapshot field holding the payload
const DATA_FIELD: &str = "data";
/// Snapshot field holding the absolute expiry
const EXPIRES_FIELD: &str = "expires";

// == Cache Entry ==
/// A single cached value with an optional absolute expiry.
///
/// Entries are never mutated after construction. Serializes as
/// `{"data": <value>, "expires": <epoch seconds or null>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// The stored value
    #[serde(rename = "data")]
    value: Value,
    /// Expiration instant (Unix seconds), None = no expiration
    #[serde(rename = "expires")]
    expires_at: Option<f64>,
}

impl Entry {
    // == Constructor ==
    /// Creates an entry from a value and an absolute expiry instant.
    pub fn new(value: Value, expires_at: Option<f64>) -> Self {
        Self { value, expires_at }
    }

    /// Creates an entry that expires `ttl` after the clock's current time.
    pub fn with_ttl<C: Clock + ?Sized>(value: Value, ttl: Option<Ttl>, clock: &C) -> Self {
        Self::new(value, Self::compute_expiry(ttl, clock))
    }

    // == Compute Expiry ==
    /// Turns a relative TTL into an absolute instant, sampling the clock once.
    ///
    /// Returns `None` when there is no TTL.
    pub fn compute_expiry<C: Clock + ?Sized>(ttl: Option<Ttl>, clock: &C) -> Option<f64> {
        ttl.map(|ttl| ttl.expires_from(clock.now()))
    }

    /// Returns the stored value, whether or not it has expired.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the absolute expiry instant, if any.
    pub fn expires_at(&self) -> Option<f64> {
        self.expires_at
    }

    // == Is Expired ==
    /// Checks if the entry has expired at the given instant.
    ///
    /// Boundary condition: an entry whose expiry equals `now` exactly is
    /// still live. Only `expires_at < now` counts as expired.
    pub fn is_expired_at(&self, now: f64) -> bool {
        match self.expires_at {
            Some(expires) => expires < now,
            None => false,
        }
    }

    /// Checks if the entry has expired according to `clock`.
    ///
    /// The clock is only read when the entry has an expiry.
    pub fn is_expired<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        self.expires_at.is_some() && self.is_expired_at(clock.now())
    }

    // == Get ==
    /// Returns the value, or `default` if the entry has expired.
    pub fn get<C: Clock + ?Sized>(&self, default: Value, clock: &C) -> Value {
        if self.is_expired(clock) {
            return default;
        }
        self.value.clone()
    }

    // == Snapshot Shape ==
    /// Returns the entry in its `{data, expires}` snapshot shape.
    pub fn to_loaded(&self) -> Value {
        let mut fields = Map::with_capacity(2);
        fields.insert(DATA_FIELD.to_string(), self.value.clone());
        fields.insert(
            EXPIRES_FIELD.to_string(),
            self.expires_at.map_or(Value::Null, Value::from),
        );
        Value::Object(fields)
    }

    /// Rebuilds an entry from a snapshot value.
    ///
    /// An object carrying both `data` and a numeric or null `expires` keeps
    /// its absolute expiry. Anything else is taken as a raw value that never
    /// expires. Never fails.
    pub fn from_loaded(loaded: Value) -> Self {
        match loaded {
            Value::Object(mut fields) if is_serialized_shape(&fields) => {
                let expires_at = fields.remove(EXPIRES_FIELD).and_then(|e| e.as_f64());
                let value = fields.remove(DATA_FIELD).unwrap_or(Value::Null);
                Self::new(value, expires_at)
            }
            raw => Self::new(raw, None),
        }
    }
}

fn is_serialized_shape(fields: &Map<String, Value>) -> bool {
    fields.contains_key(DATA_FIELD)
        && matches!(
            fields.get(EXPIRES_FIELD),
            Some(Value::Null) | Some(Value::Number(_))
        )
}
