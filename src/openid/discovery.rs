//! Discovery Cache Module
//!
//! Keeps recently discovered OpenID provider information so a returned
//! assertion can be checked without running discovery again.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{CacheStats, Clock, TimedCache};

/// Lifetime of a discovery record when none is configured.
pub const DEFAULT_DISCOVERY_TTL_SECS: u64 = 24 * 60 * 60;

// == Discovered Info ==
/// Provider information resolved for an identity URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredInfo {
    /// Identifier the user claims to own
    pub claimed_id: String,
    /// OP endpoint URL that assertions must come from
    pub op_endpoint: String,
    /// OP-local identifier, empty when it equals the claimed id
    #[serde(default)]
    pub op_local_id: String,
}

impl DiscoveredInfo {
    pub fn new(
        claimed_id: impl Into<String>,
        op_endpoint: impl Into<String>,
        op_local_id: impl Into<String>,
    ) -> Self {
        Self {
            claimed_id: claimed_id.into(),
            op_endpoint: op_endpoint.into(),
            op_local_id: op_local_id.into(),
        }
    }

    /// Local id with the OpenID 2.0 fallback to the claimed id applied.
    pub fn effective_local_id(&self) -> &str {
        if self.op_local_id.is_empty() {
            &self.claimed_id
        } else {
            &self.op_local_id
        }
    }
}

// == Discovery Check ==
/// Outcome of comparing an assertion with the cached discovery record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryCheck {
    /// Assertion agrees with a fresh record
    Match,
    /// A fresh record exists but disagrees with the assertion
    Mismatch,
    /// No fresh record, discovery has to be run again
    Miss,
}

// == Discovery Cache ==
/// Timed cache from identity string to discovered info.
#[derive(Debug)]
pub struct DiscoveryCache {
    cache: TimedCache<DiscoveredInfo>,
}

impl DiscoveryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: TimedCache::new(ttl),
        }
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: TimedCache::with_clock(ttl, clock),
        }
    }

    /// Records `info` as the discovery result for `id`.
    pub fn put(&self, id: impl Into<String>, info: DiscoveredInfo) {
        let id = id.into();
        debug!(id = %id, endpoint = %info.op_endpoint, "Caching discovery result");
        self.cache.put(id, info);
    }

    /// Returns the fresh record for `id`, purging stale records first.
    pub fn get(&self, id: &str) -> Option<DiscoveredInfo> {
        self.cache.get(id)
    }

    // == Check Assertion ==
    /// Compares an assertion against the record cached under its claimed id.
    pub fn check_assertion(
        &self,
        claimed_id: &str,
        op_endpoint: &str,
        op_local_id: &str,
    ) -> DiscoveryCheck {
        let Some(info) = self.get(claimed_id) else {
            return DiscoveryCheck::Miss;
        };

        let asserted = DiscoveredInfo::new(claimed_id, op_endpoint, op_local_id);
        if info.claimed_id == asserted.claimed_id
            && info.op_endpoint == asserted.op_endpoint
            && info.effective_local_id() == asserted.effective_local_id()
        {
            DiscoveryCheck::Match
        } else {
            debug!(claimed_id, "Assertion disagrees with cached discovery");
            DiscoveryCheck::Mismatch
        }
    }

    pub fn sweep_expired(&self) -> usize {
        self.cache.sweep_expired()
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for DiscoveryCache {
    fn default() -> Self {
        Self::new(crate::cache::ttl_from_secs(DEFAULT_DISCOVERY_TTL_SECS))
    }
}
