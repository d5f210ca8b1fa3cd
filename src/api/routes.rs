//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_discovery_handler, health_handler, nonce_handler, put_discovery_handler, stats_handler,
    verify_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/discovery", put(put_discovery_handler))
        .route("/discovery/verify", post(verify_handler))
        .route("/discovery/:id", get(get_discovery_handler))
        .route("/nonce", post(nonce_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
