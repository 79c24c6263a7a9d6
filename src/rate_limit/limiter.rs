use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::store::{RateLimitDecision, RateLimitStore, WindowRecord};

/// A (window, ceiling) pair. Profiles are just different quotas over the same
/// check function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitQuota {
    pub interval: Duration,
    pub limit: u32,
}

impl RateLimitQuota {
    pub const fn new(interval: Duration, limit: u32) -> Self {
        Self { interval, limit }
    }

    pub const fn per_minute(limit: u32) -> Self {
        Self::new(Duration::from_secs(60), limit)
    }
}

impl Default for RateLimitQuota {
    /// 10 requests per minute.
    fn default() -> Self {
        Self::per_minute(10)
    }
}

/// The component's one failure mode. Always caller-recoverable: endpoints
/// translate it into a 429 rather than letting it propagate as a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rate limit exceeded, retry in {retry_after_secs}s")]
pub struct RateLimitExceeded {
    pub retry_after_secs: u64,
}

/// Fixed-window limiter over an injected store.
///
/// Holding the store behind `Arc<dyn RateLimitStore>` keeps construction an
/// explicit dependency: tests run against their own store, and the admin
/// handlers share the server's store to inspect and reset buckets.
#[derive(Clone)]
pub struct RateLimiter {
    name: &'static str,
    quota: RateLimitQuota,
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    pub fn new(name: &'static str, quota: RateLimitQuota, store: Arc<dyn RateLimitStore>) -> Self {
        Self { name, quota, store }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn quota(&self) -> RateLimitQuota {
        self.quota
    }

    /// Record one request for `identifier` against the current window.
    pub async fn check(&self, identifier: &str) -> Result<WindowRecord, RateLimitExceeded> {
        self.check_at(identifier, Instant::now()).await
    }

    /// As `check`, with the clock supplied by the caller.
    pub async fn check_at(
        &self,
        identifier: &str,
        now: Instant,
    ) -> Result<WindowRecord, RateLimitExceeded> {
        match self.store.check(identifier, self.quota, now).await {
            RateLimitDecision::Allowed(record) => Ok(record),
            RateLimitDecision::Limited { retry_after } => {
                let retry_after_secs = retry_after_secs(retry_after);
                tracing::warn!(
                    identifier,
                    profile = self.name,
                    retry_after_secs,
                    "rate limit exceeded"
                );
                Err(RateLimitExceeded { retry_after_secs })
            }
        }
    }

    /// Drop the identifier's bucket so its next request opens a fresh window.
    pub async fn reset(&self, identifier: &str) -> bool {
        self.store.remove(identifier).await
    }
}

/// Seconds until the window resets, rounded up and never zero.
fn retry_after_secs(remaining: Duration) -> u64 {
    (((remaining.as_millis() as u64) + 999) / 1000).max(1)
}
