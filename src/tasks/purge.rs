//! Expiry Purge Task
//!
//! Background task that periodically sweeps expired entries out of a shared store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, Store};

/// Spawns a background task that periodically purges expired cache entries.
///
/// The store itself holds no locks; the host shares it behind an
/// `Arc<RwLock<_>>` and this task takes the write lock for each sweep.
/// Lazy eviction on read still applies between sweeps.
///
/// # Arguments
/// * `store` - shared reference to the store
/// * `interval` - time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task. The task runs until aborted.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(Store::new()));
/// let purge_handle = spawn_purge_task(store.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// purge_handle.abort();
/// ```
pub fn spawn_purge_task<C>(store: Arc<RwLock<Store<C>>>, interval: Duration) -> JoinHandle<()>
where
    C: Clock + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Starting expiry purge task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut guard = store.write().await;
                guard.purge_expired()
            };

            if removed > 0 {
                info!("Expiry purge: removed {} expired entries", removed);
            } else {
                debug!("Expiry purge: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, Ttl};
    use serde_json::Value;

    const SWEEP: Duration = Duration::from_millis(20);

    fn shared_store() -> (Arc<RwLock<Store<ManualClock>>>, ManualClock) {
        let clock = ManualClock::new(1_000.0);
        let store = Arc::new(RwLock::new(Store::with_clock(clock.clone())));
        (store, clock)
    }

    #[tokio::test]
    async fn test_purge_task_removes_expired_entries() {
        let (store, clock) = shared_store();
        {
            let mut guard = store.write().await;
            guard.set("expire_soon", "value", Some(Ttl::seconds(1)));
            guard.set("forever", "value", None);
        }

        clock.advance(5.0);
        let handle = spawn_purge_task(store.clone(), SWEEP);
        tokio::time::sleep(SWEEP * 5).await;

        {
            // Read the raw size: a `has` call would evict on its own
            let guard = store.read().await;
            assert_eq!(guard.len(), 1, "expired entry should have been purged");
            assert_eq!(guard.stats().expirations, 1);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_purge_task_preserves_live_entries() {
        let (store, _clock) = shared_store();
        {
            let mut guard = store.write().await;
            guard.set("long_lived", "value", Some(Ttl::seconds(3_600)));
        }

        let handle = spawn_purge_task(store.clone(), SWEEP);
        tokio::time::sleep(SWEEP * 5).await;

        {
            let mut guard = store.write().await;
            assert_eq!(guard.get("long_lived", Value::Null), Value::from("value"));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_purge_task_can_be_aborted() {
        let (store, _clock) = shared_store();

        let handle = spawn_purge_task(store, SWEEP);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
