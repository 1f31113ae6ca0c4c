//! Authentication and authorization system
//!
//! This module owns sign-in/sign-out, session-token verification, identity
//! resolution, and the access policy consumed by every view gate.

pub mod identity;
pub mod password;
pub mod policy;
pub mod session;

// Re-export commonly used types
pub use crate::core::models::{Role, User, UserStatus};
pub use identity::Identity;
pub use policy::{AccessMatrix, AccessPolicy, Feature, RoleSet};

use crate::config::AuthConfig;
use crate::core::models::{ActivityAction, ActivityLog};
use crate::storage::StorageLayer;
use crate::utils::error::{DashboardError, Result};
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main authentication system
///
/// Acts as the identity provider: resolves session tokens to profiles and
/// collapses every failure mode to "unresolved". The policy it carries never
/// sees those failures as anything but a `None` identity.
#[derive(Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Storage layer for profile rows
    storage: Arc<StorageLayer>,
    /// Session token handler
    sessions: Arc<session::SessionHandler>,
    /// Access policy
    policy: Arc<AccessPolicy>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub async fn new(config: &AuthConfig, storage: Arc<StorageLayer>) -> Result<Self> {
        info!("Initializing authentication system");

        let config = Arc::new(config.clone());
        let sessions = Arc::new(session::SessionHandler::new(&config)?);
        let policy = Arc::new(AccessPolicy::new());

        let system = Self {
            config,
            storage,
            sessions,
            policy,
        };

        system.ensure_bootstrap_account().await?;

        info!("Authentication system initialized successfully");
        Ok(system)
    }

    /// Seed the MASTER account when the user table is empty
    async fn ensure_bootstrap_account(&self) -> Result<()> {
        if !self.storage.db().list_users().await?.is_empty() {
            return Ok(());
        }

        let username = self.config.bootstrap_username.clone();
        let password = match &self.config.bootstrap_password {
            Some(password) => password.clone(),
            None => {
                let generated: String = rand::thread_rng()
                    .sample_iter(&Alphanumeric)
                    .take(16)
                    .map(char::from)
                    .collect();
                warn!(
                    "No bootstrap password configured; generated one for '{}': {}",
                    username, generated
                );
                generated
            }
        };

        let password_hash = password::hash_password(&password)?;
        let user = User::new(
            username.clone(),
            format!("{}@localhost", username),
            password_hash,
            Role::Master,
        );
        self.storage.db().create_user(&user).await?;

        info!("Seeded bootstrap MASTER account: {}", username);
        Ok(())
    }

    /// Sign a user in and mint a session token
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String)> {
        info!("User login attempt: {}", username);

        // Uniform error for unknown user, bad password, and inactive account
        let user = self
            .storage
            .db()
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| DashboardError::auth("Invalid username or password"))?;

        if !password::verify_password(password, &user.password_hash)? {
            return Err(DashboardError::auth("Invalid username or password"));
        }

        if !user.is_active() {
            return Err(DashboardError::auth("Invalid username or password"));
        }

        let token = self.sessions.create_session_token(&user).await?;

        self.storage.db().update_user_last_login(user.id()).await?;
        self.record_activity(Some(user.id()), ActivityAction::SignIn, &user.username)
            .await;

        info!("User logged in successfully: {}", username);
        Ok((user, token))
    }

    /// Sign a session out
    ///
    /// Identity reads for the token fail from this point on; there is no
    /// stale-role window after logout.
    pub async fn logout(&self, token: &str) -> Result<()> {
        let claims = self.sessions.verify_token(token).await?;
        self.sessions.revoke(claims.jti);
        self.record_activity(Some(claims.sub), ActivityAction::SignOut, &claims.role)
            .await;

        info!("User signed out: {}", claims.sub);
        Ok(())
    }

    /// Resolve a session token to the current identity
    ///
    /// Returns `None` for every failure mode: bad signature, expiry,
    /// revocation, inactive account, storage error. A valid token whose
    /// profile row is missing forces sign-out before resolving to `None`.
    pub async fn resolve_identity(&self, token: &str) -> Option<Identity> {
        let claims = match self.sessions.verify_token(token).await {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Session token rejected: {}", e);
                return None;
            }
        };

        match self.storage.db().find_user_by_id(claims.sub).await {
            Ok(Some(user)) if user.is_active() => Some(Identity::new(claims.jti, user)),
            Ok(Some(_)) => {
                debug!("Profile {} is inactive; identity unresolved", claims.sub);
                None
            }
            Ok(None) => {
                warn!(
                    "Profile row missing for session {}; forcing sign-out",
                    claims.jti
                );
                self.sessions.revoke(claims.jti);
                None
            }
            Err(e) => {
                warn!("Profile lookup failed: {}", e);
                None
            }
        }
    }

    /// Create a new user with a hashed password
    pub async fn create_user(
        &self,
        username: String,
        email: String,
        password: String,
        role: Role,
    ) -> Result<User> {
        info!("Creating new user: {}", username);

        if self
            .storage
            .db()
            .find_user_by_username(&username)
            .await?
            .is_some()
        {
            return Err(DashboardError::conflict("Username already exists"));
        }

        let password_hash = password::hash_password(&password)?;
        let user = User::new(username, email, password_hash, role);
        self.storage.db().create_user(&user).await
    }

    /// Append an activity row, logging instead of failing on error
    async fn record_activity(&self, user_id: Option<uuid::Uuid>, action: ActivityAction, detail: &str) {
        let entry = ActivityLog::new(user_id, action, detail);
        if let Err(e) = self.storage.db().append_activity(&entry).await {
            warn!("Failed to record activity: {}", e);
        }
    }

    /// Get the access policy
    pub fn policy(&self) -> Arc<AccessPolicy> {
        Arc::clone(&self.policy)
    }

    /// Get the session handler
    pub fn sessions(&self) -> &session::SessionHandler {
        &self.sessions
    }

    /// Get the authentication configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageLayer;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a-test-secret-that-is-long-enough-1234567890".to_string(),
            session_ttl: 3600,
            bootstrap_username: "master".to_string(),
            bootstrap_password: Some("bootstrap-pass-1".to_string()),
        }
    }

    async fn test_auth() -> AuthSystem {
        let storage = Arc::new(StorageLayer::memory());
        AuthSystem::new(&test_config(), storage).await.unwrap()
    }

    #[tokio::test]
    async fn test_bootstrap_account_seeded() {
        let auth = test_auth().await;
        let (user, _token) = auth.login("master", "bootstrap-pass-1").await.unwrap();
        assert_eq!(user.role, Role::Master);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let auth = test_auth().await;
        assert!(auth.login("master", "wrong-password").await.is_err());
        assert!(auth.login("nobody", "bootstrap-pass-1").await.is_err());
    }

    #[tokio::test]
    async fn test_identity_resolution() {
        let auth = test_auth().await;
        let (user, token) = auth.login("master", "bootstrap-pass-1").await.unwrap();

        let identity = auth.resolve_identity(&token).await.unwrap();
        assert_eq!(identity.user_id(), user.id());
        assert_eq!(identity.role(), Role::Master);

        assert!(auth.resolve_identity("garbage-token").await.is_none());
    }

    #[tokio::test]
    async fn test_logout_unresolves_identity() {
        let auth = test_auth().await;
        let (_user, token) = auth.login("master", "bootstrap-pass-1").await.unwrap();

        assert!(auth.resolve_identity(&token).await.is_some());
        auth.logout(&token).await.unwrap();
        assert!(auth.resolve_identity(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_profile_forces_sign_out() {
        let auth = test_auth().await;
        let (user, token) = auth.login("master", "bootstrap-pass-1").await.unwrap();

        auth.storage.db().delete_user(user.id()).await.unwrap();

        let claims = auth.sessions.verify_token(&token).await.unwrap();
        assert!(auth.resolve_identity(&token).await.is_none());
        assert!(auth.sessions.is_revoked(claims.jti));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let auth = test_auth().await;
        let result = auth
            .create_user(
                "master".to_string(),
                "duplicate@shipyard.example".to_string(),
                "password-12".to_string(),
                Role::Admin,
            )
            .await;
        assert!(matches!(result, Err(DashboardError::Conflict(_))));
    }
}
