//! Configuration management for geoquiz.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::fmt;
use std::net::IpAddr;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::ServerConfig;
use crate::cli::Args;
use crate::identity::{FirebaseIdentity, FirebaseSettings, DEFAULT_ENDPOINT, DEFAULT_TOKEN_ENDPOINT};
use crate::session::AuthContext;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerSection,
    /// Auth wiring.
    pub auth: AuthSection,
    /// Firebase project settings.
    pub firebase: FirebaseSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Enable graceful shutdown.
    pub graceful_shutdown: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            graceful_shutdown: true,
        }
    }
}

/// Which identity backend the session store is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthBackend {
    /// Firebase Authentication.
    Firebase,
    /// No identity service; sessions live in memory only.
    #[default]
    Local,
}

impl FromStr for AuthBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "firebase" => Ok(Self::Firebase),
            "local" => Ok(Self::Local),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

impl fmt::Display for AuthBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Firebase => f.write_str("firebase"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Auth configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    /// Identity backend.
    pub backend: AuthBackend,
}

/// Firebase project settings.
///
/// Only `api_key`, the two endpoints and the tokens are used by the REST client;
/// the rest identify the project and are reported at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseSection {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub app_id: Option<String>,
    /// Identity Toolkit base URL.
    pub endpoint: String,
    /// Secure Token base URL.
    pub token_endpoint: String,
    /// ID token of an already signed-in user.
    pub id_token: Option<String>,
    /// Refresh token paired with `id_token`.
    pub refresh_token: Option<String>,
}

impl Default for FirebaseSection {
    fn default() -> Self {
        Self {
            api_key: None,
            auth_domain: None,
            project_id: None,
            storage_bucket: None,
            app_id: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            id_token: None,
            refresh_token: None,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("GEOQUIZ_HOST") {
            self.server.host = host;
        }

        if let Some(port) = var("GEOQUIZ_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        if let Some(backend) = var("GEOQUIZ_AUTH_BACKEND") {
            self.auth.backend = backend.parse()?;
        }

        let firebase = [
            ("GEOQUIZ_FIREBASE_API_KEY", &mut self.firebase.api_key),
            ("GEOQUIZ_FIREBASE_AUTH_DOMAIN", &mut self.firebase.auth_domain),
            ("GEOQUIZ_FIREBASE_PROJECT_ID", &mut self.firebase.project_id),
            (
                "GEOQUIZ_FIREBASE_STORAGE_BUCKET",
                &mut self.firebase.storage_bucket,
            ),
            ("GEOQUIZ_FIREBASE_APP_ID", &mut self.firebase.app_id),
            ("GEOQUIZ_FIREBASE_ID_TOKEN", &mut self.firebase.id_token),
            (
                "GEOQUIZ_FIREBASE_REFRESH_TOKEN",
                &mut self.firebase.refresh_token,
            ),
        ];
        for (key, slot) in firebase {
            if let Some(value) = var(key).filter(|v| !v.is_empty()) {
                *slot = Some(value);
            }
        }

        if let Some(level) = var("GEOQUIZ_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = var("RUST_LOG") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = args.host {
            self.server.host = host.to_string();
        }

        if let Some(port) = args.port {
            self.server.port = port;
        }

        if let Some(backend) = args.auth {
            self.auth.backend = backend;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env()?;
        config.apply_args(args);

        Ok(config)
    }

    /// Convert to ServerConfig for the API server.
    pub fn to_server_config(&self) -> Result<ServerConfig, ConfigError> {
        let host: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.server.host.clone()))?;

        let mut server_config = ServerConfig::new(host.to_string(), self.server.port);
        if !self.server.graceful_shutdown {
            server_config = server_config.without_graceful_shutdown();
        }

        Ok(server_config)
    }

    /// Firebase REST settings, if an API key is configured.
    pub fn firebase_settings(&self) -> Option<FirebaseSettings> {
        let api_key = self.firebase.api_key.as_ref()?;
        let mut settings = FirebaseSettings::new(api_key)
            .with_endpoint(&self.firebase.endpoint)
            .with_token_endpoint(&self.firebase.token_endpoint);
        if let Some(ref token) = self.firebase.id_token {
            settings = settings.with_id_token(token);
        }
        if let Some(ref token) = self.firebase.refresh_token {
            settings = settings.with_refresh_token(token);
        }
        Some(settings)
    }

    /// Build the auth context selected by `auth.backend`.
    pub fn build_auth_context(&self) -> Result<AuthContext, ConfigError> {
        match self.auth.backend {
            AuthBackend::Local => Ok(AuthContext::local()),
            AuthBackend::Firebase => {
                let settings = self.firebase_settings().ok_or(ConfigError::MissingApiKey)?;
                Ok(AuthContext::remote(Arc::new(FirebaseIdentity::new(settings))))
            }
        }
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Invalid host address.
    InvalidHost(String),
    /// Unknown auth backend name.
    InvalidBackend(String),
    /// Firebase backend selected without an API key.
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidHost(host) => write!(f, "invalid host address: {}", host),
            Self::InvalidBackend(name) => {
                write!(f, "unknown auth backend '{}' (expected firebase or local)", name)
            }
            Self::MissingApiKey => write!(f, "firebase backend requires firebase.api_key"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AuthMode;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.backend, AuthBackend::Local);
        assert_eq!(config.firebase.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "server": { "host": "0.0.0.0", "port": 8080 },
            "auth": { "backend": "firebase" },
            "firebase": { "api_key": "AIza-test", "project_id": "geoquiz-dev" }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.backend, AuthBackend::Firebase);
        assert_eq!(config.firebase.api_key.as_deref(), Some("AIza-test"));
        assert_eq!(config.firebase.project_id.as_deref(), Some("geoquiz-dev"));
        assert_eq!(config.firebase.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"server": {"port": 9000}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_config_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_apply_env() {
        let mut config = Config::default();
        config
            .apply_env_from(env(&[
                ("GEOQUIZ_PORT", "4000"),
                ("GEOQUIZ_AUTH_BACKEND", "firebase"),
                ("GEOQUIZ_FIREBASE_API_KEY", "key-from-env"),
                ("GEOQUIZ_FIREBASE_APP_ID", ""),
                ("RUST_LOG", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.auth.backend, AuthBackend::Firebase);
        assert_eq!(config.firebase.api_key.as_deref(), Some("key-from-env"));
        assert!(config.firebase.app_id.is_none());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_apply_env_log_level_precedence() {
        let mut config = Config::default();
        config
            .apply_env_from(env(&[("GEOQUIZ_LOG_LEVEL", "warn"), ("RUST_LOG", "trace")]))
            .unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_apply_env_invalid_backend() {
        let mut config = Config::default();
        let err = config
            .apply_env_from(env(&[("GEOQUIZ_AUTH_BACKEND", "ldap")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBackend(_)));
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let args = Args {
            host: Some("192.168.1.1".parse().unwrap()),
            port: Some(5000),
            auth: Some(AuthBackend::Firebase),
            log_level: Some("trace".into()),
            ..Args::default()
        };

        config.apply_args(&args);

        assert_eq!(config.server.host, "192.168.1.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.auth.backend, AuthBackend::Firebase);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_apply_empty_args_keeps_values() {
        let mut config = Config::default();
        config.server.port = 7000;
        config.apply_args(&Args::default());
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("Firebase".parse::<AuthBackend>().unwrap(), AuthBackend::Firebase);
        assert_eq!("local".parse::<AuthBackend>().unwrap(), AuthBackend::Local);
        assert!("other".parse::<AuthBackend>().is_err());
        assert_eq!(AuthBackend::Firebase.to_string(), "firebase");
    }

    #[test]
    fn test_to_server_config() {
        let server_config = Config::default().to_server_config().unwrap();
        assert_eq!(server_config.host, "127.0.0.1");
        assert_eq!(server_config.port, 3000);
        assert!(server_config.graceful_shutdown);
    }

    #[test]
    fn test_invalid_host() {
        let mut config = Config::default();
        config.server.host = "not-an-ip".to_string();
        assert!(config.to_server_config().is_err());
    }

    #[test]
    fn test_build_local_context() {
        let ctx = Config::default().build_auth_context().unwrap();
        assert_eq!(ctx.mode(), AuthMode::Local);
    }

    #[test]
    fn test_build_firebase_context() {
        let mut config = Config::default();
        config.auth.backend = AuthBackend::Firebase;
        config.firebase.api_key = Some("k".into());

        let ctx = config.build_auth_context().unwrap();
        assert_eq!(ctx.mode(), AuthMode::Remote);
        assert_eq!(ctx.backend_name(), "firebase");
    }

    #[test]
    fn test_firebase_settings_carry_tokens() {
        let mut config = Config::default();
        config
            .apply_env_from(env(&[
                ("GEOQUIZ_FIREBASE_API_KEY", "k"),
                ("GEOQUIZ_FIREBASE_ID_TOKEN", "id"),
                ("GEOQUIZ_FIREBASE_REFRESH_TOKEN", "ref"),
            ]))
            .unwrap();

        let settings = config.firebase_settings().unwrap();
        assert_eq!(settings.id_token.as_deref(), Some("id"));
        assert_eq!(settings.refresh_token.as_deref(), Some("ref"));
        assert_eq!(settings.token_endpoint, DEFAULT_TOKEN_ENDPOINT);
    }

    #[test]
    fn test_firebase_without_key() {
        let mut config = Config::default();
        config.auth.backend = AuthBackend::Firebase;
        let err = config.build_auth_context().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_config_serialization() {
        let json = serde_json::to_string_pretty(&Config::default()).unwrap();
        assert!(json.contains("\"backend\": \"local\""));
        assert!(json.contains("\"port\""));
    }
}
