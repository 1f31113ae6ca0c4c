//! User models for the dashboard service
//!
//! This module defines user-related data structures, including the role
//! taxonomy consumed by the access policy.

use super::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account (dashboard profile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Job-function role; exactly one per profile, immutable in normal operation
    pub role: Role,
    /// Account status
    pub status: UserStatus,
    /// Last login timestamp
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Job-function role assigned to a user profile
///
/// Fixed set; determines feature access through the access matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full control, including user management and system settings
    Master,
    /// Production planning and inventory control
    Ppic,
    /// Production execution
    Production,
    /// Yard operations
    Operation,
    /// Administration
    Admin,
    /// Finance (invoicing)
    Finance,
    /// Management oversight; restricted to read-only interaction app-wide
    Manager,
}

impl Role {
    /// Every role in the taxonomy
    pub const ALL: [Role; 7] = [
        Role::Master,
        Role::Ppic,
        Role::Production,
        Role::Operation,
        Role::Admin,
        Role::Finance,
        Role::Manager,
    ];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Master => write!(f, "MASTER"),
            Role::Ppic => write!(f, "PPIC"),
            Role::Production => write!(f, "PRODUCTION"),
            Role::Operation => write!(f, "OPERATION"),
            Role::Admin => write!(f, "ADMIN"),
            Role::Finance => write!(f, "FINANCE"),
            Role::Manager => write!(f, "MANAGER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MASTER" => Ok(Role::Master),
            "PPIC" => Ok(Role::Ppic),
            "PRODUCTION" => Ok(Role::Production),
            "OPERATION" => Ok(Role::Operation),
            "ADMIN" => Ok(Role::Admin),
            "FINANCE" => Ok(Role::Finance),
            "MANAGER" => Ok(Role::Manager),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// User account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Active user
    Active,
    /// Deactivated user (cannot sign in)
    Inactive,
}

impl User {
    /// Create a new active user
    pub fn new(username: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            metadata: Metadata::new(),
            username,
            email,
            display_name: None,
            password_hash,
            role,
            status: UserStatus::Active,
            last_login_at: None,
        }
    }

    /// Get user ID
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    /// Check if user is active
    pub fn is_active(&self) -> bool {
        matches!(self.status, UserStatus::Active)
    }

    /// Update last login
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(chrono::Utc::now());
        self.metadata.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_user_creation() {
        let user = User::new(
            "foreman".to_string(),
            "foreman@shipyard.example".to_string(),
            "hashed_password".to_string(),
            Role::Production,
        );

        assert_eq!(user.username, "foreman");
        assert_eq!(user.role, Role::Production);
        assert!(user.is_active());
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(&role.to_string()), Ok(role));
        }
        assert!(Role::from_str("SUPERVISOR").is_err());
        assert!(Role::from_str("master").is_err());
    }

    #[test]
    fn test_inactive_user() {
        let mut user = User::new(
            "retired".to_string(),
            "retired@shipyard.example".to_string(),
            "hashed_password".to_string(),
            Role::Admin,
        );
        user.status = UserStatus::Inactive;
        assert!(!user.is_active());
    }
}
