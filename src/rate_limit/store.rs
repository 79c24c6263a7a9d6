use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::{Duration, Instant};

use super::limiter::RateLimitQuota;

/// Counter state for one identifier's current window.
///
/// At most one record exists per identifier. `count` starts at 1, never
/// decreases within a window, and resets to 1 when a new window begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRecord {
    pub count: u32,
    pub reset_at: Instant,
}

/// Outcome of recording one request against a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request admitted; the record reflects the count including this request.
    Allowed(WindowRecord),
    /// Window is full. Rejected requests do not advance the count.
    Limited { retry_after: Duration },
}

/// Storage port for rate-limit counters.
///
/// `check` is the whole read-modify-write for one request and must be atomic
/// per key, so a lost update cannot admit requests past the ceiling when
/// parallel workers hit the same identifier. The remaining methods support
/// the admin back-office and the expiry sweep. A production deployment that
/// needs a cross-process limit implements this trait over a shared counter
/// service; the in-memory `MemoryStore` is the single-process default.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record one request for `key`, admitting or rejecting it per the quota.
    async fn check(&self, key: &str, quota: RateLimitQuota, now: Instant) -> RateLimitDecision;

    /// Current record for `key`, if any (expired records included until swept).
    async fn get(&self, key: &str) -> Option<WindowRecord>;

    /// Drop the record for `key`. Returns false if none existed.
    async fn remove(&self, key: &str) -> bool;

    /// Evict records whose window has ended. Returns how many were dropped.
    async fn sweep(&self, now: Instant) -> usize;

    /// Snapshot of all live records.
    async fn entries(&self) -> Vec<(String, WindowRecord)>;

    /// Number of tracked identifiers.
    async fn len(&self) -> usize;
}

/// Process-local store backed by a sharded concurrent map. The entry API
/// holds the shard lock across the read-modify-write, which is the critical
/// section the trait contract asks for.
#[derive(Debug, Default)]
pub struct MemoryStore {
    buckets: DashMap<String, WindowRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { buckets: DashMap::new() }
    }
}

#[async_trait]
impl RateLimitStore for MemoryStore {
    async fn check(&self, key: &str, quota: RateLimitQuota, now: Instant) -> RateLimitDecision {
        match self.buckets.entry(key.to_string()) {
            Entry::Vacant(vacant) => {
                let record = WindowRecord { count: 1, reset_at: now + quota.interval };
                vacant.insert(record);
                RateLimitDecision::Allowed(record)
            }
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                if now >= record.reset_at {
                    // Window over: restart the counter for a fresh window
                    record.count = 1;
                    record.reset_at = now + quota.interval;
                    RateLimitDecision::Allowed(*record)
                } else if record.count < quota.limit {
                    record.count += 1;
                    RateLimitDecision::Allowed(*record)
                } else {
                    RateLimitDecision::Limited { retry_after: record.reset_at - now }
                }
            }
        }
    }

    async fn get(&self, key: &str) -> Option<WindowRecord> {
        self.buckets.get(key).map(|entry| *entry.value())
    }

    async fn remove(&self, key: &str) -> bool {
        self.buckets.remove(key).is_some()
    }

    async fn sweep(&self, now: Instant) -> usize {
        let before = self.buckets.len();
        self.buckets.retain(|_, record| record.reset_at > now);
        before - self.buckets.len()
    }

    async fn entries(&self) -> Vec<(String, WindowRecord)> {
        self.buckets
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    async fn len(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quota(window_ms: u64, limit: u32) -> RateLimitQuota {
        RateLimitQuota::new(Duration::from_millis(window_ms), limit)
    }

    #[tokio::test]
    async fn first_request_opens_window_with_count_one() {
        let store = MemoryStore::new();
        let now = Instant::now();

        match store.check("10.0.0.1", quota(60_000, 10), now).await {
            RateLimitDecision::Allowed(record) => {
                assert_eq!(record.count, 1);
                assert_eq!(record.reset_at, now + Duration::from_millis(60_000));
            }
            RateLimitDecision::Limited { .. } => panic!("first request must be admitted"),
        }
    }

    #[tokio::test]
    async fn rejected_requests_do_not_advance_count() {
        let store = MemoryStore::new();
        let now = Instant::now();
        let q = quota(60_000, 2);

        store.check("10.0.0.1", q, now).await;
        store.check("10.0.0.1", q, now).await;
        store.check("10.0.0.1", q, now).await; // rejected

        let record = store.get("10.0.0.1").await.unwrap();
        assert_eq!(record.count, 2);
    }

    #[tokio::test]
    async fn expired_window_restarts_at_one() {
        let store = MemoryStore::new();
        let now = Instant::now();
        let q = quota(1_000, 2);

        store.check("10.0.0.1", q, now).await;
        store.check("10.0.0.1", q, now).await;

        let later = now + Duration::from_millis(1_000);
        match store.check("10.0.0.1", q, later).await {
            RateLimitDecision::Allowed(record) => {
                assert_eq!(record.count, 1);
                assert_eq!(record.reset_at, later + Duration::from_millis(1_000));
            }
            RateLimitDecision::Limited { .. } => panic!("expired window must admit"),
        }
    }

    #[tokio::test]
    async fn sweep_drops_only_expired_records() {
        let store = MemoryStore::new();
        let now = Instant::now();

        store.check("expired", quota(1_000, 5), now).await;
        store.check("live", quota(60_000, 5), now).await;

        let removed = store.sweep(now + Duration::from_millis(1_500)).await;
        assert_eq!(removed, 1);
        assert!(store.get("expired").await.is_none());
        assert!(store.get("live").await.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn remove_reports_whether_key_existed() {
        let store = MemoryStore::new();
        let now = Instant::now();

        store.check("10.0.0.1", quota(60_000, 5), now).await;
        assert!(store.remove("10.0.0.1").await);
        assert!(!store.remove("10.0.0.1").await);
        assert!(store.get("10.0.0.1").await.is_none());
    }

    #[tokio::test]
    async fn entries_snapshots_all_records() {
        let store = MemoryStore::new();
        let now = Instant::now();
        let q = quota(60_000, 5);

        store.check("a", q, now).await;
        store.check("b", q, now).await;
        store.check("b", q, now).await;

        let mut entries = store.entries().await;
        entries.sort_by(|x, y| x.0.cmp(&y.0));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "a");
        assert_eq!(entries[0].1.count, 1);
        assert_eq!(entries[1].1.count, 2);
    }
}
