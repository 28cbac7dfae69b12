//! Clock Module
//!
//! Time sources used for TTL computation and expiry checks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

// == Clock Trait ==
/// A source of wall-clock time.
pub trait Clock {
    /// Returns the current time as fractional seconds since the Unix epoch.
    fn now(&self) -> f64;
}

// == System Clock ==
/// Reads the real wall clock at microsecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        let now = Utc::now();
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can hold one handle while a
/// `Store` owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    /// Current instant, stored as `f64` bits
    now_bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock frozen at `start` epoch seconds.
    pub fn new(start: f64) -> Self {
        Self {
            now_bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    /// Moves the clock to an absolute instant.
    pub fn set(&self, now: f64) {
        self.now_bits.store(now.to_bits(), Ordering::SeqCst);
    }

    /// Moves the clock forward (or backward, for negative values).
    pub fn advance(&self, secs: f64) {
        let _ = self
            .now_bits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |bits| {
                Some((f64::from_bits(bits) + secs).to_bits())
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.now_bits.load(Ordering::SeqCst))
    }
}
