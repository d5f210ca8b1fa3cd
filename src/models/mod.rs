//! Request and Response models for the OpenID state API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{NonceRequest, PutDiscoveryRequest, VerifyRequest};
pub use responses::{
    DiscoveryResponse, ErrorResponse, HealthResponse, NonceResponse, PutDiscoveryResponse,
    StatsResponse, VerifyResponse,
};
