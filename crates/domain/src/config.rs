//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_TIMEOUT_SECS};

/// Backend client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin including the `/api` prefix (e.g. `http://localhost:8080/api`)
    pub base_url: String,
    /// Transport timeout applied to every request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Serialize concurrent refresh attempts so a burst of 401s triggers a
    /// single `/auth/refresh` round-trip
    #[serde(default = "default_coalesce_refresh")]
    pub coalesce_refresh: bool,
    /// Keychain service name used by the keychain credential store
    #[serde(default = "default_keychain_service")]
    pub keychain_service: String,
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with every other field defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Transport timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join an endpoint path onto the base URL without doubling slashes.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if endpoint.is_empty() {
            base.to_string()
        } else if endpoint.starts_with('/') {
            format!("{base}{endpoint}")
        } else {
            format!("{base}/{endpoint}")
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            coalesce_refresh: true,
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_coalesce_refresh() -> bool {
    true
}

fn default_keychain_service() -> String {
    DEFAULT_KEYCHAIN_SERVICE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_paths() {
        let config = ClientConfig::with_base_url("http://localhost:8080/api/");
        assert_eq!(config.endpoint_url("/accounts"), "http://localhost:8080/api/accounts");
        assert_eq!(config.endpoint_url("accounts"), "http://localhost:8080/api/accounts");
        assert_eq!(config.endpoint_url(""), "http://localhost:8080/api");
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "base_url": "https://bank.example/api" }"#).unwrap();

        assert_eq!(config.base_url, "https://bank.example/api");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.coalesce_refresh);
        assert_eq!(config.keychain_service, DEFAULT_KEYCHAIN_SERVICE);
        assert!(config.user_agent.is_none());
    }
}
