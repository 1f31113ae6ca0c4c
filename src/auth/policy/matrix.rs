//! Feature-to-role access matrix

use super::types::Feature;
use crate::core::models::Role;
use crate::core::models::Role::{Admin, Finance, Manager, Master, Operation, Ppic, Production};
use std::collections::{HashMap, HashSet};

/// Standard grants, one row per feature
///
/// MANAGER is listed for every feature it may view; mutation is gated
/// separately through the read-only derivation, not through this table.
const STANDARD_GRANTS: &[(Feature, &[Role])] = &[
    (
        Feature::Dashboard,
        &[Master, Ppic, Production, Operation, Admin, Finance, Manager],
    ),
    (
        Feature::WorkOrders,
        &[Master, Ppic, Production, Operation, Admin, Manager],
    ),
    (
        Feature::WorkDetails,
        &[Master, Ppic, Production, Operation, Admin, Manager],
    ),
    (
        Feature::Progress,
        &[Master, Ppic, Production, Operation, Admin, Manager],
    ),
    (
        Feature::Verification,
        &[Master, Ppic, Production, Operation, Admin, Manager],
    ),
    (
        Feature::Bastp,
        &[Master, Ppic, Production, Operation, Admin, Finance, Manager],
    ),
    (
        Feature::Vessels,
        &[Master, Ppic, Production, Operation, Admin, Manager],
    ),
    (Feature::Invoices, &[Master, Finance, Manager]),
    (Feature::UserManagement, &[Master]),
    (Feature::SystemSettings, &[Master]),
    (
        Feature::Reports,
        &[Master, Ppic, Production, Operation, Admin, Finance, Manager],
    ),
    (
        Feature::ExportData,
        &[Master, Ppic, Production, Operation, Admin, Manager],
    ),
    (Feature::ActivityLogs, &[Master, Manager]),
];

/// Mapping from feature to the set of roles permitted to use it
///
/// Static for the lifetime of the process. Lookups fail closed: a feature
/// without an entry is a feature nobody may access.
#[derive(Debug, Clone)]
pub struct AccessMatrix {
    grants: HashMap<Feature, HashSet<Role>>,
}

impl AccessMatrix {
    /// The standard dashboard matrix
    pub fn standard() -> Self {
        let grants = STANDARD_GRANTS
            .iter()
            .map(|(feature, roles)| (*feature, roles.iter().copied().collect()))
            .collect();
        Self { grants }
    }

    /// Matrix with no grants at all; denies everything
    pub fn empty() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    /// Add or replace a feature's grant row
    pub fn grant(&mut self, feature: Feature, roles: &[Role]) {
        self.grants.insert(feature, roles.iter().copied().collect());
    }

    /// Remove a feature's grant row entirely
    pub fn revoke(&mut self, feature: Feature) {
        self.grants.remove(&feature);
    }

    /// Roles permitted for a feature, if the feature is mapped
    pub fn roles_for(&self, feature: Feature) -> Option<&HashSet<Role>> {
        self.grants.get(&feature)
    }

    /// Whether `role` may use `feature`; absent entries deny
    pub fn permits(&self, feature: Feature, role: Role) -> bool {
        self.grants
            .get(&feature)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// Number of mapped features
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Whether the matrix has no grant rows
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl Default for AccessMatrix {
    fn default() -> Self {
        Self::standard()
    }
}
