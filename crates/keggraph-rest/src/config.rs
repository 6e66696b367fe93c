//! Remote endpoint configuration.

use url::Url;

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TOGOWS_URL: &str = "http://togows.dbcls.jp/entry/";
pub const DEFAULT_KEGG_URL: &str = "https://rest.kegg.jp/";
pub const DEFAULT_USER_AGENT: &str = concat!("keggraph/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// KEGG REST rejects `get` requests naming more than ten entries.
pub const DEFAULT_MAX_IDS_PER_REQUEST: usize = 10;

pub const ENV_TOGOWS_URL: &str = "KEGGRAPH_TOGOWS_URL";
pub const ENV_KEGG_URL: &str = "KEGGRAPH_KEGG_URL";
pub const ENV_USER_AGENT: &str = "KEGGRAPH_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "KEGGRAPH_TIMEOUT_SECS";
pub const ENV_MAX_IDS: &str = "KEGGRAPH_MAX_IDS";

// ============================================================================
// Configuration
// ============================================================================

/// Base addresses and transport settings for remote record access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    /// Per-field entry service (`{base}{db}/{id}/{field}`).
    pub togows_base_url: String,
    /// KEGG REST (`get/`, `link/`).
    pub kegg_base_url: String,
    pub user_agent: String,
    /// Handed to the HTTP client; resolvers never retry.
    pub timeout_secs: u64,
    pub max_ids_per_request: usize,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            togows_base_url: DEFAULT_TOGOWS_URL.to_string(),
            kegg_base_url: DEFAULT_KEGG_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_ids_per_request: DEFAULT_MAX_IDS_PER_REQUEST,
        }
    }
}

impl RestConfig {
    /// Defaults overridden by `KEGGRAPH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_TOGOWS_URL) {
            config.togows_base_url = url;
        }
        if let Some(url) = lookup(ENV_KEGG_URL) {
            config.kegg_base_url = url;
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            config.user_agent = agent;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_number(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_IDS) {
            config.max_ids_per_request = parse_number(ENV_MAX_IDS, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        base_url("togows_base_url", &self.togows_base_url)?;
        base_url("kegg_base_url", &self.kegg_base_url)?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_ids_per_request == 0 {
            return Err(ConfigError::Invalid {
                key: "max_ids_per_request".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
        reason: "not a non-negative integer".to_string(),
    })
}

/// Parse a base address; it must be an absolute http(s) URL that can take
/// path segments.
pub(crate) fn base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("cannot be used as a base URL".to_string()));
    }
    Ok(url)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
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
    fn defaults_are_valid() {
        let config = RestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_ids_per_request, 10);
        assert_eq!(config.togows_base_url, "http://togows.dbcls.jp/entry/");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = RestConfig::from_lookup(lookup(&[
            (ENV_KEGG_URL, "http://localhost:8080/kegg/"),
            (ENV_MAX_IDS, "5"),
            (ENV_TIMEOUT_SECS, " 12 "),
        ]))
        .unwrap();
        assert_eq!(config.kegg_base_url, "http://localhost:8080/kegg/");
        assert_eq!(config.max_ids_per_request, 5);
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.togows_base_url, DEFAULT_TOGOWS_URL);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = RestConfig::from_lookup(lookup(&[(ENV_MAX_IDS, "ten")])).unwrap_err();
        assert!(err.to_string().contains(ENV_MAX_IDS));
        assert!(RestConfig::from_lookup(lookup(&[(ENV_MAX_IDS, "0")])).is_err());
        assert!(RestConfig::from_lookup(lookup(&[(ENV_KEGG_URL, "not a url")])).is_err());
        assert!(RestConfig::from_lookup(lookup(&[(ENV_KEGG_URL, "ftp://rest.kegg.jp/")])).is_err());
    }
}
