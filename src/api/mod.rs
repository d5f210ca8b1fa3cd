//! API Module
//!
//! HTTP handlers and routing for the OpenID state service.
//!
//! # Endpoints
//! - `PUT /discovery` - Cache a discovery result
//! - `GET /discovery/:id` - Look up a fresh discovery result (id percent-encoded)
//! - `POST /discovery/verify` - Check an assertion against the cache
//! - `POST /nonce` - Consume a response nonce
//! - `GET /stats` - Discovery cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
