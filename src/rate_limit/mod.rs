// Fixed-window request throttling.
//
// The algorithm lives behind the RateLimitStore port so the in-memory map can
// be swapped for a shared external counter service without touching call
// sites. Known trade-offs of the fixed-window counter: up to 2x the ceiling
// can pass through a rolling window that straddles a boundary, and separate
// server processes keep separate counts.

pub mod limiter;
pub mod store;
pub mod sweep;

pub use limiter::{RateLimitExceeded, RateLimitQuota, RateLimiter};
pub use store::{MemoryStore, RateLimitDecision, RateLimitStore, WindowRecord};
pub use sweep::spawn_sweeper;
