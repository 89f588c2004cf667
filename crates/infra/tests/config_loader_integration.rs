//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use sigma_domain::SigmaError;
use sigma_infra::config;
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "base_url": "https://bank.example/api",
            "timeout_secs": 15,
            "user_agent": "sigma-desktop/2.1",
            "coalesce_refresh": false,
            "keychain_service": "Sigma.Staging"
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config from JSON file");

    assert_eq!(config.base_url, "https://bank.example/api");
    assert_eq!(config.timeout_secs, 15);
    assert_eq!(config.user_agent.as_deref(), Some("sigma-desktop/2.1"));
    assert!(!config.coalesce_refresh);
    assert_eq!(config.keychain_service, "Sigma.Staging");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
base_url = "http://10.0.2.2:8080/api"
timeout_secs = 5
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config from TOML file");

    assert_eq!(config.base_url, "http://10.0.2.2:8080/api");
    assert_eq!(config.timeout_secs, 5);
    assert!(config.user_agent.is_none());
    assert!(config.coalesce_refresh);
    assert_eq!(config.keychain_service, "Sigma.Finance");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_without_base_url_fails() {
    let path = write_config(r#"{ "timeout_secs": 10 }"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    match result {
        Err(SigmaError::Config(msg)) => assert!(msg.contains("base_url")),
        other => panic!("Expected Config error, got {other:?}"),
    }

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/config.json".into()));

    match result {
        Err(SigmaError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let path = write_config(r#"{ "this is": "not valid" "#, "json");

    let result = config::load_from_file(Some(path.clone()));
    match result {
        Err(SigmaError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        _ => panic!("Expected Config error"),
    }

    std::fs::remove_file(path).ok();
}
