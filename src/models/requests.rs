//! Request DTOs for the OpenID state API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::openid::DiscoveredInfo;

/// Maximum accepted length for identifiers, endpoints and nonces
pub const MAX_FIELD_LENGTH: usize = 2048;

/// Request body for storing a discovery result (PUT /discovery)
#[derive(Debug, Clone, Deserialize)]
pub struct PutDiscoveryRequest {
    /// Identity the record is cached under, normalized before use
    pub id: String,
    pub claimed_id: String,
    pub op_endpoint: String,
    #[serde(default)]
    pub op_local_id: String,
}

impl PutDiscoveryRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.op_endpoint.is_empty() {
            return Some("op_endpoint cannot be empty".to_string());
        }
        check_lengths(&[
            ("id", self.id.as_str()),
            ("claimed_id", self.claimed_id.as_str()),
            ("op_endpoint", self.op_endpoint.as_str()),
            ("op_local_id", self.op_local_id.as_str()),
        ])
    }

    /// Splits the request into its cache key and record.
    pub fn into_parts(self) -> (String, DiscoveredInfo) {
        let info = DiscoveredInfo::new(self.claimed_id, self.op_endpoint, self.op_local_id);
        (self.id, info)
    }
}

/// Request body for checking an assertion (POST /discovery/verify)
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub claimed_id: String,
    pub op_endpoint: String,
    #[serde(default)]
    pub op_local_id: String,
}

impl VerifyRequest {
    pub fn validate(&self) -> Option<String> {
        check_lengths(&[
            ("claimed_id", self.claimed_id.as_str()),
            ("op_endpoint", self.op_endpoint.as_str()),
            ("op_local_id", self.op_local_id.as_str()),
        ])
    }
}

/// Request body for consuming a nonce (POST /nonce)
#[derive(Debug, Clone, Deserialize)]
pub struct NonceRequest {
    /// OP endpoint that issued the nonce
    pub endpoint: String,
    /// Raw `openid.response_nonce` value
    pub nonce: String,
}

impl NonceRequest {
    pub fn validate(&self) -> Option<String> {
        if self.endpoint.is_empty() {
            return Some("endpoint cannot be empty".to_string());
        }
        check_lengths(&[("endpoint", self.endpoint.as_str()), ("nonce", self.nonce.as_str())])
    }
}

fn check_lengths(fields: &[(&str, &str)]) -> Option<String> {
    fields
        .iter()
        .find(|(_, value)| value.len() > MAX_FIELD_LENGTH)
        .map(|(name, _)| format!("{} exceeds maximum length of {} bytes", name, MAX_FIELD_LENGTH))
}
