//! Error types for the OpenID state service
//!
//! The timed caches themselves never fail; these errors come from nonce
//! checks, identifier normalization and request validation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the service.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// No fresh discovery record for the identifier
    #[error("Discovery record not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Identifier cannot be normalized
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Nonce has no parseable timestamp prefix
    #[error("Invalid nonce: {0}")]
    InvalidNonce(String),

    /// Nonce timestamp is older than the accepted window
    #[error("Nonce too old: {0}")]
    NonceExpired(String),

    /// Nonce was already seen for this endpoint
    #[error("Nonce already used: {0}")]
    NonceReplayed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_)
            | CacheError::InvalidIdentifier(_)
            | CacheError::InvalidNonce(_)
            | CacheError::NonceExpired(_) => StatusCode::BAD_REQUEST,
            CacheError::NonceReplayed(_) => StatusCode::CONFLICT,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, CacheError>;
