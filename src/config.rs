//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime of a discovery record in seconds
    pub discovery_ttl: u64,
    /// Maximum accepted nonce age in seconds
    pub nonce_max_age: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Periodic sweep interval in seconds, 0 disables the sweep task
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DISCOVERY_TTL` - Discovery record lifetime in seconds (default: 86400)
    /// - `NONCE_MAX_AGE` - Nonce acceptance window in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 0, lazy eviction only)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any name -> value source, falling back to the
    /// defaults for missing or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            discovery_ttl: parse_or(&lookup, "DISCOVERY_TTL", defaults.discovery_ttl),
            nonce_max_age: parse_or(&lookup, "NONCE_MAX_AGE", defaults.nonce_max_age),
            server_port: parse_or(&lookup, "SERVER_PORT", defaults.server_port),
            sweep_interval: parse_or(&lookup, "SWEEP_INTERVAL", defaults.sweep_interval),
        }
    }

    /// Whether the periodic sweep task should run.
    pub fn sweep_enabled(&self) -> bool {
        self.sweep_interval > 0
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discovery_ttl: 24 * 60 * 60,
            nonce_max_age: 60,
            server_port: 3000,
            sweep_interval: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.discovery_ttl, 86_400);
        assert_eq!(config.nonce_max_age, 60);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 0);
        assert!(!config.sweep_enabled());
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.discovery_ttl, 86_400);
        assert_eq!(config.nonce_max_age, 60);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 0);
    }

    #[test]
    fn test_config_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DISCOVERY_TTL", "600"),
            ("SERVER_PORT", "8080"),
            ("SWEEP_INTERVAL", "5"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.discovery_ttl, 600);
        assert_eq!(config.nonce_max_age, 60);
        assert_eq!(config.server_port, 8080);
        assert!(config.sweep_enabled());
    }

    #[test]
    fn test_config_ignores_garbage() {
        let config = Config::from_lookup(|name| match name {
            "SERVER_PORT" => Some("99999".to_string()),
            "NONCE_MAX_AGE" => Some("not-a-number".to_string()),
            _ => None,
        });
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.nonce_max_age, 60);
    }
}
