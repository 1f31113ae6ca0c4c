//! Access policy
//!
//! Answers three questions given the current identity (or lack thereof):
//! does this role match a required set, is this feature permitted for this
//! role, and is this actor restricted to read-only interaction. Pure
//! functions over a static matrix; no I/O, no interior state, safe to call
//! redundantly on every request.

mod matrix;
#[cfg(test)]
mod tests;
mod types;

pub use matrix::AccessMatrix;
pub use types::{Feature, RoleSet};

use crate::auth::identity::Identity;
use crate::core::models::Role;

/// Role and feature access policy
///
/// Every query treats an unresolved identity (`None`) as the uniform
/// deny-everything signal; upstream failures never surface here as anything
/// else.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    matrix: AccessMatrix,
}

impl AccessPolicy {
    /// Policy over the standard matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy over a caller-supplied matrix
    pub fn with_matrix(matrix: AccessMatrix) -> Self {
        Self { matrix }
    }

    /// The matrix backing this policy
    pub fn matrix(&self) -> &AccessMatrix {
        &self.matrix
    }

    /// Whether the identity's role is in the required set
    ///
    /// False when the identity is unresolved, and false for an empty set
    /// regardless of identity (authorial error, not a runtime fault).
    pub fn has_role(&self, identity: Option<&Identity>, required: &RoleSet) -> bool {
        match identity {
            Some(identity) => required.contains(identity.role()),
            None => false,
        }
    }

    /// Whether the identity may use the feature
    ///
    /// Governs visibility only; mutation is gated separately through
    /// [`AccessPolicy::is_read_only`]. Fails closed on unresolved identity
    /// and on features with no matrix entry.
    pub fn can_access_feature(&self, identity: Option<&Identity>, feature: Feature) -> bool {
        match identity {
            Some(identity) => self.matrix.permits(feature, identity.role()),
            None => false,
        }
    }

    /// Whether the actor is restricted to read-only interaction
    ///
    /// True iff the identity is resolved and its role is MANAGER. An
    /// unresolved identity is not read-only; it is denied outright by the
    /// other two checks.
    pub fn is_read_only(&self, identity: Option<&Identity>) -> bool {
        matches!(identity, Some(identity) if identity.role() == Role::Manager)
    }

    /// Features the identity may use, in matrix-table order
    ///
    /// Convenience for the sign-in response the frontend builds its
    /// navigation from.
    pub fn permitted_features(&self, identity: Option<&Identity>) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|feature| self.can_access_feature(identity, *feature))
            .collect()
    }
}
