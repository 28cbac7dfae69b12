//! TTL Module
//!
//! Relative time-to-live values accepted by `set` and friends.

use std::time::Duration as StdDuration;

use chrono::Duration;

// == Ttl ==
/// A span of time relative to "now".
///
/// Integer seconds and structured durations are interchangeable: equal
/// spans always produce the same expiry instant. Negative spans are allowed
/// and yield an entry that is already expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Whole seconds, possibly negative
    Seconds(i64),
    /// A signed chrono duration
    Delta(Duration),
    /// An unsigned std duration
    Std(StdDuration),
}

impl Ttl {
    /// Shorthand for `Ttl::Seconds`.
    pub fn seconds(secs: i64) -> Self {
        Ttl::Seconds(secs)
    }

    // == Span ==
    /// Returns the full span in fractional seconds, sub-second part included.
    pub fn as_secs_f64(&self) -> f64 {
        match self {
            Ttl::Seconds(secs) => *secs as f64,
            Ttl::Delta(delta) => {
                delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1_000_000_000.0
            }
            Ttl::Std(duration) => duration.as_secs_f64(),
        }
    }

    /// Returns the absolute instant this span ends at, counted from `now`.
    pub fn expires_from(&self, now: f64) -> f64 {
        now + self.as_secs_f64()
    }
}

impl From<i64> for Ttl {
    fn from(secs: i64) -> Self {
        Ttl::Seconds(secs)
    }
}

impl From<i32> for Ttl {
    fn from(secs: i32) -> Self {
        Ttl::Seconds(i64::from(secs))
    }
}

impl From<Duration> for Ttl {
    fn from(delta: Duration) -> Self {
        Ttl::Delta(delta)
    }
}

impl From<StdDuration> for Ttl {
    fn from(duration: StdDuration) -> Self {
        Ttl::Std(duration)
    }
}
