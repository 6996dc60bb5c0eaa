//! Startup configuration for the webhook process
//!
//! The webhook is configured through environment variables only:
//!
//! - `GROUP_NAME` (required): API group the solvers are served under
//! - `WEBHOOK_LISTEN_ADDR`: socket address to bind (default `0.0.0.0:8443`)
//! - `WEBHOOK_LOG_LEVEL`: trace, debug, info, warn or error (default `info`)

use crate::error::{Error, Result};
use std::net::SocketAddr;

/// Environment variable holding the API group name
pub const GROUP_NAME_VAR: &str = "GROUP_NAME";

/// Environment variable holding the listen address
pub const LISTEN_ADDR_VAR: &str = "WEBHOOK_LISTEN_ADDR";

/// Environment variable holding the log level
pub const LOG_LEVEL_VAR: &str = "WEBHOOK_LOG_LEVEL";

/// Default listen address
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8443";

/// Webhook startup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// API group, e.g. `acme.example.com`
    pub group_name: String,

    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,

    /// Log level name
    pub log_level: String,
}

impl WebhookConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// `from_env` is this function bound to `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let group_name = lookup(GROUP_NAME_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::config(format!("{} must be specified", GROUP_NAME_VAR)))?;

        let listen_addr = lookup(LISTEN_ADDR_VAR)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_addr.trim().parse().map_err(|e| {
            Error::config(format!(
                "{} '{}' is not a valid socket address: {}",
                LISTEN_ADDR_VAR, listen_addr, e
            ))
        })?;

        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "info".to_string());

        let config = Self {
            group_name,
            listen_addr,
            log_level,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.group_name.is_empty() {
            return Err(Error::config(format!("{} must be specified", GROUP_NAME_VAR)));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(Error::config(format!(
                "{} '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                LOG_LEVEL_VAR, other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_group_name_is_fatal() {
        let err = WebhookConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("GROUP_NAME")));
    }

    #[test]
    fn test_empty_group_name_is_fatal() {
        let err = WebhookConfig::from_lookup(lookup(&[("GROUP_NAME", "  ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let config = WebhookConfig::from_lookup(lookup(&[("GROUP_NAME", "acme.example.com")]))
            .unwrap();

        assert_eq!(config.group_name, "acme.example.com");
        assert_eq!(config.listen_addr, "0.0.0.0:8443".parse().unwrap());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = WebhookConfig::from_lookup(lookup(&[
            ("GROUP_NAME", "acme.example.com"),
            ("WEBHOOK_LISTEN_ADDR", "127.0.0.1:9443"),
            ("WEBHOOK_LOG_LEVEL", "DEBUG"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9443".parse().unwrap());
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_listen_addr() {
        let err = WebhookConfig::from_lookup(lookup(&[
            ("GROUP_NAME", "acme.example.com"),
            ("WEBHOOK_LISTEN_ADDR", "not-an-address"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("WEBHOOK_LISTEN_ADDR")));
    }

    #[test]
    fn test_any_non_empty_group_name_is_accepted() {
        for group in ["acme.example.com.", "Acme.Example.com"] {
            let config = WebhookConfig::from_lookup(lookup(&[("GROUP_NAME", group)])).unwrap();
            assert_eq!(config.group_name, group);
        }
    }

    #[test]
    fn test_invalid_log_level() {
        let err = WebhookConfig::from_lookup(lookup(&[
            ("GROUP_NAME", "acme.example.com"),
            ("WEBHOOK_LOG_LEVEL", "chatty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("chatty")));
    }
}
