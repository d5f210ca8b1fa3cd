//! OpenID Cache - short-lived relying-party state for OpenID logins
//!
//! Holds discovered provider information and consumed response nonces in
//! memory, expiring both after a fixed time and purging them lazily on read.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod openid;
pub mod tasks;

pub use api::AppState;
pub use cache::TimedCache;
pub use config::Config;
pub use openid::{DiscoveredInfo, DiscoveryCache, NonceStore};
pub use tasks::spawn_sweep_task;
