//! Session token handling
//!
//! This module provides session token creation, verification, and
//! revocation. Tokens are HS256 JWTs carrying the user id and role; the
//! revocation set makes sign-out take effect immediately.

use crate::config::AuthConfig;
use crate::core::models::User;
use crate::utils::error::{DashboardError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use uuid::Uuid;

/// Session handler for token operations
pub struct SessionHandler {
    /// Encoding key for signing tokens
    encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    decoding_key: DecodingKey,
    /// Token algorithm
    algorithm: Algorithm,
    /// Token lifetime in seconds
    expiration: u64,
    /// Token issuer
    issuer: String,
    /// Signed-out session ids
    revoked: RwLock<HashSet<Uuid>>,
}

impl std::fmt::Debug for SessionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandler")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .field("issuer", &self.issuer)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
    /// Session ID
    pub jti: Uuid,
    /// Role tag carried for diagnostics; access decisions re-read the profile
    pub role: String,
}

impl SessionHandler {
    /// Create a new session handler
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let secret = config.jwt_secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.session_ttl,
            issuer: "drydock".to_string(),
            revoked: RwLock::new(HashSet::new()),
        })
    }

    /// Create a session token for a user
    pub async fn create_session_token(&self, user: &User) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| DashboardError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user.id(),
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4(),
            role: user.role.to_string(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(DashboardError::Session)?;

        debug!("Created session token for user: {}", user.id());
        Ok(token)
    }

    /// Verify a session token and return its claims
    ///
    /// Rejects tampered, expired, and revoked tokens alike.
    pub async fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(DashboardError::Session)?;

        if self.is_revoked(data.claims.jti) {
            return Err(DashboardError::auth("Session has been signed out"));
        }

        Ok(data.claims)
    }

    /// Revoke a session id; later verifications of its token fail
    pub fn revoke(&self, session_id: Uuid) {
        self.revoked.write().insert(session_id);
    }

    /// Check whether a session id has been revoked
    pub fn is_revoked(&self, session_id: Uuid) -> bool {
        self.revoked.read().contains(&session_id)
    }

    /// Token lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.expiration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Role;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a-test-secret-that-is-long-enough-1234567890".to_string(),
            session_ttl: 3600,
            bootstrap_username: "master".to_string(),
            bootstrap_password: Some("bootstrap-pass-1".to_string()),
        }
    }

    fn test_user() -> User {
        User::new(
            "ppic".to_string(),
            "ppic@shipyard.example".to_string(),
            "hash".to_string(),
            Role::Ppic,
        )
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let handler = SessionHandler::new(&test_config()).unwrap();
        let user = test_user();

        let token = handler.create_session_token(&user).await.unwrap();
        let claims = handler.verify_token(&token).await.unwrap();

        assert_eq!(claims.sub, user.id());
        assert_eq!(claims.role, "PPIC");
        assert_eq!(claims.iss, "drydock");
    }

    #[tokio::test]
    async fn test_tampered_token_rejected() {
        let handler = SessionHandler::new(&test_config()).unwrap();
        let user = test_user();

        let token = handler.create_session_token(&user).await.unwrap();
        let mut tampered = token.clone();
        tampered.push('x');

        assert!(handler.verify_token(&tampered).await.is_err());
    }

    #[tokio::test]
    async fn test_revocation() {
        let handler = SessionHandler::new(&test_config()).unwrap();
        let user = test_user();

        let token = handler.create_session_token(&user).await.unwrap();
        let claims = handler.verify_token(&token).await.unwrap();

        handler.revoke(claims.jti);
        assert!(handler.is_revoked(claims.jti));
        assert!(handler.verify_token(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_wrong_secret_rejected() {
        let handler = SessionHandler::new(&test_config()).unwrap();
        let user = test_user();
        let token = handler.create_session_token(&user).await.unwrap();

        let mut other_config = test_config();
        other_config.jwt_secret = "a-different-secret-that-is-long-enough-000".to_string();
        let other = SessionHandler::new(&other_config).unwrap();

        assert!(other.verify_token(&token).await.is_err());
    }
}
