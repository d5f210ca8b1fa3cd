//! Timed Cache Module
//!
//! Mutex-guarded map from string keys to values that expire a fixed time
//! after insertion. Expired entries are purged lazily, on every read.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Duration;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

// == Timed Cache ==
/// TTL-bounded cache with eviction piggybacked on `get`.
///
/// Nothing bounds growth between reads: a cache that is only ever written
/// to keeps every entry until the next `get` or `sweep_expired`.
pub struct TimedCache<V> {
    inner: Mutex<Inner<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: CacheStats,
}

impl<V: Clone> TimedCache<V> {
    // == Constructor ==
    /// Creates an empty cache on the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
            ttl,
            clock,
        }
    }

    // == Put ==
    /// Inserts or replaces the entry for `key`, stamping the current time.
    pub fn put(&self, key: impl Into<String>, value: V) {
        let now = self.clock.now();
        let mut inner = self.lock();
        inner.entries.insert(key.into(), CacheEntry::new(value, now));
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
    }

    // == Get ==
    /// Purges every expired entry, then looks up `key`.
    ///
    /// `None` covers both a key that was never inserted and one that was
    /// purged by this very call.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut inner = self.lock();
        prune(&mut inner, now, self.ttl);

        let value = inner.entries.get(key).map(|entry| entry.value.clone());
        match value {
            Some(_) => inner.stats.record_hit(),
            None => inner.stats.record_miss(),
        }
        value
    }

    // == Sweep Expired ==
    /// Runs the same purge as `get` without a lookup.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut inner = self.lock();
        prune(&mut inner, now, self.ttl)
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats.clone()
    }

    /// Number of stored entries, including any not yet purged.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // Both operations stay total: a panic in another holder must not
    // turn into a panic here.
    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Rebuilds the entry map from its unexpired survivors.
fn prune<V>(inner: &mut Inner<V>, now: chrono::DateTime<chrono::Utc>, ttl: Duration) -> usize {
    let before = inner.entries.len();
    inner.entries = std::mem::take(&mut inner.entries)
        .into_iter()
        .filter(|(_, entry)| !entry.is_expired(now, ttl))
        .collect();

    let removed = before - inner.entries.len();
    if removed > 0 {
        debug!("Purged {} expired entries", removed);
        inner.stats.record_expired(removed);
    }
    let len = inner.entries.len();
    inner.stats.set_total_entries(len);
    removed
}

impl<V> fmt::Debug for TimedCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
