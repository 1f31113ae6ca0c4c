//! Configuration management for the dashboard service
//!
//! This module handles loading and validation of all service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the dashboard service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DashboardError::config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| DashboardError::config(format!("Failed to parse config: {}", e)))?;

        config.apply_env_overrides();
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `DRYDOCK_*` environment overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("DRYDOCK_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("DRYDOCK_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(secret) = std::env::var("DRYDOCK_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(password) = std::env::var("DRYDOCK_BOOTSTRAP_PASSWORD") {
            self.auth.bootstrap_password = Some(password);
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| DashboardError::config(format!("Server config error: {}", e)))?;

        self.server
            .cors
            .validate()
            .map_err(|e| DashboardError::config(format!("CORS config error: {}", e)))?;

        self.auth
            .validate()
            .map_err(|e| DashboardError::config(format!("Auth config error: {}", e)))?;

        self.storage
            .validate()
            .map_err(|e| DashboardError::config(format!("Storage config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| DashboardError::config(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_config_from_file() {
        let config_content = r#"
server:
  host: "127.0.0.1"
  port: 8080

auth:
  jwt_secret: "test-secret-that-is-at-least-32-characters-long"
  session_ttl: 3600
  bootstrap_username: "master"
  bootstrap_password: "bootstrap-pass-1"

storage:
  backend: "memory"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.session_ttl, 3600);
        assert_eq!(config.storage.backend, "memory");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("server"));
    }

    #[tokio::test]
    async fn test_unknown_backend_rejected() {
        let config = Config {
            storage: StorageConfig {
                backend: "postgres".to_string(),
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
