//! Resolved identity of the current actor
//!
//! An identity pairs a session with the profile it resolved to. "Unresolved"
//! is represented as `Option::None` everywhere the policy consumes it; every
//! upstream failure mode (expired token, missing profile row, storage error)
//! collapses to that one signal.

use crate::core::models::{Role, User};
use serde::Serialize;
use uuid::Uuid;

/// The authenticated actor: session id plus resolved profile
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    /// Session (token) identifier
    pub session_id: Uuid,
    /// Resolved user profile; carries exactly one role
    pub user: User,
}

impl Identity {
    /// Create an identity from a session id and profile
    pub fn new(session_id: Uuid, user: User) -> Self {
        Self { session_id, user }
    }

    /// The profile's role
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// The profile's user id
    pub fn user_id(&self) -> Uuid {
        self.user.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_role() {
        let user = User::new(
            "finance".to_string(),
            "finance@shipyard.example".to_string(),
            "hash".to_string(),
            Role::Finance,
        );
        let identity = Identity::new(Uuid::new_v4(), user);
        assert_eq!(identity.role(), Role::Finance);
    }
}
