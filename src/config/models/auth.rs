//! Authentication configuration

use super::*;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session token signing secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// Session lifetime in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl: u64,
    /// Username seeded for the MASTER account when the user table is empty
    #[serde(default = "default_bootstrap_username")]
    pub bootstrap_username: String,
    /// Password for the seeded MASTER account; generated and logged when unset
    #[serde(default)]
    pub bootstrap_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            session_ttl: default_session_ttl(),
            bootstrap_username: default_bootstrap_username(),
            bootstrap_password: None,
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err(
                "JWT secret must be at least 32 characters long for security".to_string(),
            );
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(
                "JWT secret must not use default values. Please generate a secure random secret."
                    .to_string(),
            );
        }

        if self.session_ttl < 300 {
            return Err("Session lifetime should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.session_ttl > 86_400 * 30 {
            return Err(
                "Session lifetime should not exceed 30 days for security reasons".to_string(),
            );
        }

        if self.bootstrap_username.is_empty() {
            return Err("Bootstrap username cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_auth_config_is_valid() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.jwt_secret.len(), 64);
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: "short".to_string(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_ttl_bounds() {
        let config = AuthConfig {
            session_ttl: 60,
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AuthConfig {
            session_ttl: 86_400 * 60,
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
