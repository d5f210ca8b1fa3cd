//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with insertion stamps.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// Represents a single cache entry with value and insertion time.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was (last) written
    pub inserted_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with `now`.
    pub fn new(value: V, now: DateTime<Utc>) -> Self {
        Self {
            value,
            inserted_at: now,
        }
    }

    // == Age ==
    /// Time elapsed since insertion, as seen at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.inserted_at
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is still
    /// valid. Only strictly greater ages are expired.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) > ttl
    }
}
