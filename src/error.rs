//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Only snapshot loading can fail. Reads and writes on a live store are
/// infallible and report plain booleans.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Snapshot text was not valid JSON
    #[error("Malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err: CacheError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("Malformed snapshot:"));
    }
}
