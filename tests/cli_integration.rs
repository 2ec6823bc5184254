//! CLI integration tests.
//!
//! These tests verify the CLI argument parsing and configuration loading.

use std::ffi::OsString;
use std::io::Write;
use tempfile::NamedTempFile;

use geoquiz::cli::{parse_args_from, Args};
use geoquiz::config::{AuthBackend, Config, ConfigError};
use geoquiz::AuthMode;

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("geoquiz")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-H",
        "0.0.0.0",
        "-p",
        "8080",
        "-a",
        "firebase",
        "-l",
        "debug",
    ]))
    .unwrap();

    assert_eq!(result.host.unwrap().to_string(), "0.0.0.0");
    assert_eq!(result.port, Some(8080));
    assert_eq!(result.auth, Some(AuthBackend::Firebase));
    assert_eq!(result.log_level, Some("debug".to_string()));
}

#[test]
fn test_cli_invalid_host() {
    assert!(parse_args_from(args(&["-H", "not-an-ip"])).is_err());
}

#[test]
fn test_cli_unknown_flag() {
    assert!(parse_args_from(args(&["--no-such-flag"])).is_err());
}

// ============================================================================
// Config Layering Tests
// ============================================================================

#[test]
fn test_file_then_args() {
    let json = r#"{
        "server": { "host": "10.0.0.1", "port": 7000 },
        "auth": { "backend": "firebase" },
        "firebase": { "api_key": "file-key" }
    }"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let mut config = Config::from_file(file.path()).unwrap();
    let cli = Args {
        port: Some(7100),
        auth: Some(AuthBackend::Local),
        ..Args::default()
    };
    config.apply_args(&cli);

    assert_eq!(config.server.host, "10.0.0.1");
    assert_eq!(config.server.port, 7100);
    assert_eq!(config.auth.backend, AuthBackend::Local);
    assert_eq!(config.build_auth_context().unwrap().mode(), AuthMode::Local);
}

#[test]
fn test_firebase_context_from_file() {
    let json = r#"{
        "auth": { "backend": "firebase" },
        "firebase": {
            "api_key": "AIza-demo",
            "auth_domain": "demo.firebaseapp.com",
            "project_id": "demo",
            "endpoint": "http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1"
        }
    }"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    let settings = config.firebase_settings().unwrap();
    assert_eq!(settings.api_key, "AIza-demo");
    assert!(settings.endpoint.starts_with("http://127.0.0.1:9099"));

    let ctx = config.build_auth_context().unwrap();
    assert_eq!(ctx.mode(), AuthMode::Remote);
}

#[test]
fn test_firebase_backend_requires_key() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"auth": {"backend": "firebase"}}"#)
        .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(matches!(
        config.build_auth_context(),
        Err(ConfigError::MissingApiKey)
    ));
}

#[test]
fn test_unknown_backend_in_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"auth": {"backend": "ldap"}}"#).unwrap();

    assert!(matches!(
        Config::from_file(file.path()),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_missing_config_file() {
    let cli = Args {
        config: Some("/nonexistent/geoquiz.json".into()),
        ..Args::default()
    };
    assert!(matches!(Config::load(&cli), Err(ConfigError::Io(_))));
}
