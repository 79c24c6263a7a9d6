use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use super::store::RateLimitStore;

/// Periodically evict expired buckets so the store does not grow with every
/// identifier ever seen. Counters are correct without this; only memory
/// depends on it.
pub fn spawn_sweeper(store: Arc<dyn RateLimitStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick fires immediately; skip it so a fresh server
        // doesn't log an empty sweep on boot.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = store.sweep(Instant::now()).await;
            if removed > 0 {
                tracing::debug!(removed, "swept expired rate limit buckets");
            }
        }
    })
}
