//! Process configuration, read once at startup from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use standpos_advisor::AdvisorConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Sessions untouched for this long are dropped with their ledger.
pub const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(4 * 60 * 60);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub session_idle_ttl: Duration,
    pub advisor: AdvisorConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    ///
    /// Recognized variables: `STANDPOS_BIND_ADDR`, `STANDPOS_SESSION_IDLE_SECS`,
    /// `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_ENDPOINT`, `GEMINI_TIMEOUT_SECS`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("STANDPOS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            name: "STANDPOS_BIND_ADDR",
            reason: format!("{bind_raw:?}: {e}"),
        })?;

        let session_idle_ttl = match get("STANDPOS_SESSION_IDLE_SECS") {
            Some(raw) => positive_secs(&raw, "STANDPOS_SESSION_IDLE_SECS")?,
            None => DEFAULT_SESSION_IDLE_TTL,
        };

        let mut advisor = AdvisorConfig {
            api_key: get("GEMINI_API_KEY"),
            ..AdvisorConfig::default()
        };
        if let Some(model) = get("GEMINI_MODEL") {
            advisor.model = model;
        }
        if let Some(endpoint) = get("GEMINI_ENDPOINT") {
            advisor.endpoint = endpoint;
        }
        if let Some(raw) = get("GEMINI_TIMEOUT_SECS") {
            advisor.timeout = positive_secs(&raw, "GEMINI_TIMEOUT_SECS")?;
        }

        Ok(Self {
            bind_addr,
            session_idle_ttl,
            advisor,
        })
    }
}

fn positive_secs(raw: &str, name: &'static str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .ok()
        .filter(|s| *s > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::Invalid {
            name,
            reason: format!("{raw:?} is not a positive number of seconds"),
        })
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
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_any_variables() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.session_idle_ttl, DEFAULT_SESSION_IDLE_TTL);
        assert_eq!(config.advisor, AdvisorConfig::default());
        assert!(config.advisor.api_key.is_none());
    }

    #[test]
    fn reads_advisor_settings() {
        let config = AppConfig::from_lookup(lookup(&[
            ("STANDPOS_BIND_ADDR", "127.0.0.1:9000"),
            ("GEMINI_API_KEY", " abc "),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.advisor.api_key.as_deref(), Some("abc"));
        assert_eq!(config.advisor.model, "gemini-2.0-flash");
        assert_eq!(config.advisor.timeout, Duration::from_secs(5));
    }

    #[test]
    fn reads_session_idle_ttl() {
        let config = AppConfig::from_lookup(lookup(&[("STANDPOS_SESSION_IDLE_SECS", "900")])).unwrap();
        assert_eq!(config.session_idle_ttl, Duration::from_secs(900));

        let err = AppConfig::from_lookup(lookup(&[("STANDPOS_SESSION_IDLE_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "STANDPOS_SESSION_IDLE_SECS", .. }));
    }

    #[test]
    fn blank_key_is_treated_as_absent() {
        let config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "   ")])).unwrap();
        assert!(config.advisor.api_key.is_none());
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("GEMINI_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "GEMINI_TIMEOUT_SECS", .. }));

        let err = AppConfig::from_lookup(lookup(&[("STANDPOS_BIND_ADDR", "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "STANDPOS_BIND_ADDR", .. }));
    }
}
