//! API Handlers
//!
//! HTTP request handlers for each endpoint of the OpenID state service.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::ttl_from_secs;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DiscoveryResponse, HealthResponse, NonceRequest, NonceResponse, PutDiscoveryRequest,
    PutDiscoveryResponse, StatsResponse, VerifyRequest, VerifyResponse,
};
use crate::openid::{normalize, DiscoveryCache, NonceStore};

/// Application state shared across all handlers.
///
/// Both stores lock internally, so the state only needs shared handles.
#[derive(Clone, Debug)]
pub struct AppState {
    pub discovery: Arc<DiscoveryCache>,
    pub nonces: Arc<NonceStore>,
}

impl AppState {
    pub fn new(discovery: DiscoveryCache, nonces: NonceStore) -> Self {
        Self {
            discovery: Arc::new(discovery),
            nonces: Arc::new(nonces),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            DiscoveryCache::new(ttl_from_secs(config.discovery_ttl)),
            NonceStore::new(ttl_from_secs(config.nonce_max_age)),
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DiscoveryCache::default(), NonceStore::default())
    }
}

/// Handler for PUT /discovery
///
/// Caches a discovery result under the normalized identifier. The claimed
/// id is normalized too, so it compares equal to asserted ids at verify time.
pub async fn put_discovery_handler(
    State(state): State<AppState>,
    Json(req): Json<PutDiscoveryRequest>,
) -> Result<Json<PutDiscoveryResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let (id, mut info) = req.into_parts();
    let id = normalize(&id)?;
    info.claimed_id = normalize(&info.claimed_id)?;
    state.discovery.put(id.clone(), info);

    Ok(Json(PutDiscoveryResponse::new(id)))
}

/// Handler for GET /discovery/:id
///
/// Looks up the fresh discovery record for an identifier.
pub async fn get_discovery_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiscoveryResponse>> {
    let id = normalize(&id)?;
    let info = state
        .discovery
        .get(&id)
        .ok_or_else(|| CacheError::NotFound(id.clone()))?;

    Ok(Json(DiscoveryResponse::new(id, info)))
}

/// Handler for POST /discovery/verify
///
/// Compares an assertion with the cached discovery record. A miss is a
/// normal outcome that tells the caller to run discovery again.
pub async fn verify_handler(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let claimed_id = normalize(&req.claimed_id)?;
    let result = state
        .discovery
        .check_assertion(&claimed_id, &req.op_endpoint, &req.op_local_id);
    info!(claimed_id = %claimed_id, ?result, "Checked assertion against discovery cache");

    Ok(Json(VerifyResponse { result }))
}

/// Handler for POST /nonce
///
/// Consumes a response nonce; replays and stale nonces are rejected.
pub async fn nonce_handler(
    State(state): State<AppState>,
    Json(req): Json<NonceRequest>,
) -> Result<Json<NonceResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.nonces.accept(&req.endpoint, &req.nonce)?;
    Ok(Json(NonceResponse::accepted()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.discovery.stats();
    Json(StatsResponse::new(&stats, state.nonces.len()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
