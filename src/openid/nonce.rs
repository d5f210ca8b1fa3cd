//! Nonce Store Module
//!
//! Replay protection for `openid.response_nonce` values. A nonce starts with
//! the UTC time the provider issued it; nonces older than the accepted
//! window are refused outright, and younger ones may be used once per
//! endpoint.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::{debug, warn};

use crate::cache::{Clock, SystemClock};
use crate::error::{CacheError, Result};

/// Accepted nonce age when none is configured.
pub const DEFAULT_NONCE_MAX_AGE_SECS: u64 = 60;

/// Longest nonce accepted, in bytes.
pub const MAX_NONCE_LEN: usize = 256;

/// Length of the `YYYY-MM-DDTHH:MM:SSZ` prefix.
const TIMESTAMP_LEN: usize = 20;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone)]
struct SeenNonce {
    nonce: String,
    issued_at: DateTime<Utc>,
}

// == Nonce Store ==
/// Per-endpoint record of recently accepted nonces.
pub struct NonceStore {
    seen: Mutex<HashMap<String, Vec<SeenNonce>>>,
    max_age: Duration,
    clock: Arc<dyn Clock>,
}

impl NonceStore {
    pub fn new(max_age: Duration) -> Self {
        Self::with_clock(max_age, Arc::new(SystemClock))
    }

    pub fn with_clock(max_age: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            seen: Mutex::new(HashMap::new()),
            max_age,
            clock,
        }
    }

    // == Accept ==
    /// Accepts `nonce` for `endpoint` if it is fresh and unused.
    ///
    /// Stale nonces recorded for the same endpoint are dropped first.
    pub fn accept(&self, endpoint: &str, nonce: &str) -> Result<()> {
        let issued_at = parse_timestamp(nonce)?;
        let now = self.clock.now();

        if now - issued_at > self.max_age {
            warn!(endpoint, "Rejected stale nonce");
            return Err(CacheError::NonceExpired(nonce.to_string()));
        }

        let mut seen = self.lock();
        let list = seen.entry(endpoint.to_string()).or_default();
        let max_age = self.max_age;
        let survivors: Vec<SeenNonce> = std::mem::take(list)
            .into_iter()
            .filter(|s| now - s.issued_at <= max_age)
            .collect();
        *list = survivors;

        if list.iter().any(|s| s.nonce == nonce) {
            warn!(endpoint, "Rejected replayed nonce");
            return Err(CacheError::NonceReplayed(nonce.to_string()));
        }

        list.push(SeenNonce {
            nonce: nonce.to_string(),
            issued_at,
        });
        debug!(endpoint, "Accepted nonce");
        Ok(())
    }

    // == Sweep Expired ==
    /// Drops every stale nonce across all endpoints.
    ///
    /// Returns the number of nonces removed.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let max_age = self.max_age;
        let mut seen = self.lock();
        let before: usize = seen.values().map(Vec::len).sum();

        *seen = std::mem::take(&mut *seen)
            .into_iter()
            .filter_map(|(endpoint, list)| {
                let list: Vec<SeenNonce> = list
                    .into_iter()
                    .filter(|s| now - s.issued_at <= max_age)
                    .collect();
                (!list.is_empty()).then_some((endpoint, list))
            })
            .collect();

        before - seen.values().map(Vec::len).sum::<usize>()
    }

    /// Number of nonces currently remembered.
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<SeenNonce>>> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for NonceStore {
    fn default() -> Self {
        Self::new(crate::cache::ttl_from_secs(DEFAULT_NONCE_MAX_AGE_SECS))
    }
}

impl fmt::Debug for NonceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonceStore")
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

/// Reads the issue time from the nonce's leading timestamp.
fn parse_timestamp(nonce: &str) -> Result<DateTime<Utc>> {
    if nonce.len() > MAX_NONCE_LEN {
        return Err(CacheError::InvalidNonce(format!(
            "nonce exceeds {} bytes",
            MAX_NONCE_LEN
        )));
    }

    let prefix = nonce
        .get(..TIMESTAMP_LEN)
        .ok_or_else(|| CacheError::InvalidNonce(nonce.to_string()))?;

    NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| CacheError::InvalidNonce(nonce.to_string()))
}
