//! Mini Cache - snapshot tool
//!
//! Loads a cache snapshot, drops the entries that have expired, and prints
//! the pruned snapshot to stdout.

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::{Config, Store};

/// Entry point for the snapshot tool.
///
/// # Steps
/// 1. Initialize tracing on stderr, keeping stdout for the snapshot
/// 2. Load configuration; a path argument overrides `CACHE_SNAPSHOT`
/// 3. Read the snapshot from the file, or stdin when no path is given
/// 4. Seed a store, which drops expired entries
/// 5. Print the pruned snapshot
fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_snapshot_path(path);
    }

    let text = match &config.snapshot_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read snapshot from stdin")?;
            buf
        }
    };

    let store = Store::from_json(&text).context("Failed to load snapshot")?;
    info!("Snapshot loaded: {} live entries", store.len());

    let output = if config.pretty {
        serde_json::to_string_pretty(&store).context("Failed to encode snapshot")?
    } else {
        store.to_json()
    };
    println!("{}", output);

    Ok(())
}
