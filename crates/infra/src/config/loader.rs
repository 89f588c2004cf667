//! Configuration loader
//!
//! Loads the client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `SIGMA_API_BASE_URL` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SIGMA_API_BASE_URL`: Backend origin including `/api` (required)
//! - `SIGMA_API_TIMEOUT_SECS`: Transport timeout in seconds
//! - `SIGMA_API_USER_AGENT`: User agent sent with every request
//! - `SIGMA_COALESCE_REFRESH`: Share one token refresh between concurrent
//!   requests (true/false)
//! - `SIGMA_KEYCHAIN_SERVICE`: Keychain service name for stored credentials
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./sigma.json` or `./sigma.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use sigma_domain::constants::{DEFAULT_KEYCHAIN_SERVICE, DEFAULT_TIMEOUT_SECS};
use sigma_domain::{ClientConfig, Result, SigmaError};

pub const BASE_URL_VAR: &str = "SIGMA_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "SIGMA_API_TIMEOUT_SECS";
pub const USER_AGENT_VAR: &str = "SIGMA_API_USER_AGENT";
pub const COALESCE_REFRESH_VAR: &str = "SIGMA_COALESCE_REFRESH";
pub const KEYCHAIN_SERVICE_VAR: &str = "SIGMA_KEYCHAIN_SERVICE";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL
/// variable is missing or invalid, falls back to a config file.
///
/// # Errors
/// Returns `SigmaError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `SigmaError::Config` if `SIGMA_API_BASE_URL` is missing or a
/// variable has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let base_url = env_var(BASE_URL_VAR)?;
    if base_url.trim().is_empty() {
        return Err(SigmaError::Config(format!("{BASE_URL_VAR} is empty")));
    }

    let timeout_secs = match std::env::var(TIMEOUT_VAR) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| SigmaError::Config(format!("Invalid request timeout: {e}")))?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    Ok(ClientConfig {
        base_url,
        timeout_secs,
        user_agent: std::env::var(USER_AGENT_VAR).ok().filter(|agent| !agent.is_empty()),
        coalesce_refresh: env_bool(COALESCE_REFRESH_VAR, true),
        keychain_service: std::env::var(KEYCHAIN_SERVICE_VAR)
            .ok()
            .filter(|service| !service.is_empty())
            .unwrap_or_else(|| DEFAULT_KEYCHAIN_SERVICE.to_string()),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SigmaError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SigmaError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SigmaError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SigmaError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SigmaError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SigmaError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SigmaError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_paths(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_paths(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_paths(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("sigma.json"),
        dir.join("sigma.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| SigmaError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_sigma_env() {
        for key in [BASE_URL_VAR, TIMEOUT_VAR, USER_AGENT_VAR, COALESCE_REFRESH_VAR, KEYCHAIN_SERVICE_VAR]
        {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("SIGMA_TEST_BOOL_YES", "YES");
        std::env::set_var("SIGMA_TEST_BOOL_OFF", "off");
        std::env::remove_var("SIGMA_TEST_BOOL_MISSING");

        assert!(env_bool("SIGMA_TEST_BOOL_YES", false));
        assert!(!env_bool("SIGMA_TEST_BOOL_OFF", true));
        assert!(env_bool("SIGMA_TEST_BOOL_MISSING", true));
        assert!(!env_bool("SIGMA_TEST_BOOL_MISSING", false));

        std::env::remove_var("SIGMA_TEST_BOOL_YES");
        std::env::remove_var("SIGMA_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_sigma_env();

        std::env::set_var(BASE_URL_VAR, "https://bank.example/api");
        std::env::set_var(TIMEOUT_VAR, "12");
        std::env::set_var(USER_AGENT_VAR, "sigma-desktop/2.1");
        std::env::set_var(COALESCE_REFRESH_VAR, "false");
        std::env::set_var(KEYCHAIN_SERVICE_VAR, "Sigma.Staging");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.base_url, "https://bank.example/api");
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.user_agent.as_deref(), Some("sigma-desktop/2.1"));
        assert!(!config.coalesce_refresh);
        assert_eq!(config.keychain_service, "Sigma.Staging");

        clear_sigma_env();
    }

    #[test]
    fn test_load_from_env_defaults_optional_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_sigma_env();

        std::env::set_var(BASE_URL_VAR, "http://localhost:9090/api");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.user_agent.is_none());
        assert!(config.coalesce_refresh);
        assert_eq!(config.keychain_service, DEFAULT_KEYCHAIN_SERVICE);

        clear_sigma_env();
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_sigma_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, SigmaError::Config(msg) if msg.contains(BASE_URL_VAR)));
    }

    #[test]
    fn test_load_from_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_sigma_env();

        std::env::set_var(BASE_URL_VAR, "http://localhost:8080/api");
        std::env::set_var(TIMEOUT_VAR, "soon");

        let result = load_from_env();
        assert!(matches!(result, Err(SigmaError::Config(_))), "Should be a Config error");

        clear_sigma_env();
    }

    #[test]
    fn test_parse_config_unsupported_extension() {
        let err = parse_config("base_url: x", Path::new("config.yaml")).unwrap_err();
        assert_eq!(err, SigmaError::Config("Unsupported config format: yaml".into()));
    }

    #[test]
    fn test_parse_config_toml_applies_defaults() {
        let config =
            parse_config(r#"base_url = "https://bank.example/api""#, Path::new("sigma.toml"))
                .expect("valid toml");
        assert_eq!(config.base_url, "https://bank.example/api");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.coalesce_refresh);
    }
}
