//! Response DTOs for the OpenID state API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::openid::{DiscoveredInfo, DiscoveryCheck};

/// Response body for a discovery lookup (GET /discovery/{id})
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryResponse {
    /// Normalized identifier the record was found under
    pub id: String,
    #[serde(flatten)]
    pub info: DiscoveredInfo,
}

impl DiscoveryResponse {
    pub fn new(id: impl Into<String>, info: DiscoveredInfo) -> Self {
        Self {
            id: id.into(),
            info,
        }
    }
}

/// Response body for storing a discovery result (PUT /discovery)
#[derive(Debug, Clone, Serialize)]
pub struct PutDiscoveryResponse {
    pub message: String,
    /// Normalized identifier the record was stored under
    pub id: String,
}

impl PutDiscoveryResponse {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Discovery for '{}' cached", id),
            id,
        }
    }
}

/// Response body for an assertion check (POST /discovery/verify)
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    pub result: DiscoveryCheck,
}

/// Response body for an accepted nonce (POST /nonce)
#[derive(Debug, Clone, Serialize)]
pub struct NonceResponse {
    pub message: String,
}

impl NonceResponse {
    pub fn accepted() -> Self {
        Self {
            message: "Nonce accepted".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Discovery lookups that found a fresh record
    pub hits: u64,
    /// Discovery lookups that found nothing
    pub misses: u64,
    /// Discovery records purged after expiring
    pub expired: u64,
    /// Discovery records currently stored
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Nonces currently remembered
    pub nonces: usize,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, nonces: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            nonces,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
