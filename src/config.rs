//! Configuration Module
//!
//! Handles loading the snapshot tool's configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Snapshot tool configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Snapshot file to load; stdin when unset
    pub snapshot_path: Option<PathBuf>,
    /// Pretty-print the pruned snapshot
    pub pretty: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SNAPSHOT` - Path of the snapshot file (default: read stdin)
    /// - `CACHE_PRETTY` - `1`, `true` or `yes` to pretty-print (default: off)
    pub fn from_env() -> Self {
        Self {
            snapshot_path: env::var_os("CACHE_SNAPSHOT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            pretty: env::var("CACHE_PRETTY")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Overrides the snapshot path, e.g. from a command-line argument.
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.snapshot_path.is_none());
        assert!(!config.pretty);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the env vars to avoid races between tests
        env::remove_var("CACHE_SNAPSHOT");
        env::remove_var("CACHE_PRETTY");
        assert_eq!(Config::from_env(), Config::default());

        env::set_var("CACHE_SNAPSHOT", "/tmp/cache.json");
        env::set_var("CACHE_PRETTY", "Yes");
        let config = Config::from_env();
        assert_eq!(config.snapshot_path, Some(PathBuf::from("/tmp/cache.json")));
        assert!(config.pretty);

        env::remove_var("CACHE_SNAPSHOT");
        env::remove_var("CACHE_PRETTY");
    }

    #[test]
    fn test_with_snapshot_path() {
        let config = Config::default().with_snapshot_path("snap.json");
        assert_eq!(config.snapshot_path, Some(PathBuf::from("snap.json")));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
