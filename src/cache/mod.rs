//! Cache Module
//!
//! Provides in-memory timed caching with lazy, read-driven expiry.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TimedCache;

// == Public Constants ==
/// Upper bound applied to configured lifetimes (100 years)
pub const MAX_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Converts a lifetime in seconds into a cache TTL, clamped to `MAX_TTL_SECS`.
pub fn ttl_from_secs(secs: u64) -> chrono::Duration {
    chrono::Duration::seconds(secs.min(MAX_TTL_SECS) as i64)
}
