//! OpenID Module
//!
//! Relying-party state kept between the redirect to a provider and the
//! verification of its assertion.

mod discovery;
mod nonce;
mod normalize;

pub use discovery::{DiscoveredInfo, DiscoveryCache, DiscoveryCheck, DEFAULT_DISCOVERY_TTL_SECS};
pub use nonce::{NonceStore, DEFAULT_NONCE_MAX_AGE_SECS, MAX_NONCE_LEN};
pub use normalize::normalize;
