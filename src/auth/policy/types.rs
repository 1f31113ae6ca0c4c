//! Access policy type definitions

use crate::core::models::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Named capability area of the application
///
/// Closed set known at build time; a misspelled feature is a compile error,
/// not a silent denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    Dashboard,
    WorkOrders,
    WorkDetails,
    Progress,
    Verification,
    Bastp,
    Vessels,
    Invoices,
    UserManagement,
    SystemSettings,
    Reports,
    ExportData,
    ActivityLogs,
}

impl Feature {
    /// Every feature gated by the access matrix
    pub const ALL: [Feature; 13] = [
        Feature::Dashboard,
        Feature::WorkOrders,
        Feature::WorkDetails,
        Feature::Progress,
        Feature::Verification,
        Feature::Bastp,
        Feature::Vessels,
        Feature::Invoices,
        Feature::UserManagement,
        Feature::SystemSettings,
        Feature::Reports,
        Feature::ExportData,
        Feature::ActivityLogs,
    ];
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Feature::Dashboard => "dashboard",
            Feature::WorkOrders => "workOrders",
            Feature::WorkDetails => "workDetails",
            Feature::Progress => "progress",
            Feature::Verification => "verification",
            Feature::Bastp => "bastp",
            Feature::Vessels => "vessels",
            Feature::Invoices => "invoices",
            Feature::UserManagement => "userManagement",
            Feature::SystemSettings => "systemSettings",
            Feature::Reports => "reports",
            Feature::ExportData => "exportData",
            Feature::ActivityLogs => "activityLogs",
        };
        write!(f, "{}", tag)
    }
}

impl std::str::FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Feature::Dashboard),
            "workOrders" => Ok(Feature::WorkOrders),
            "workDetails" => Ok(Feature::WorkDetails),
            "progress" => Ok(Feature::Progress),
            "verification" => Ok(Feature::Verification),
            "bastp" => Ok(Feature::Bastp),
            "vessels" => Ok(Feature::Vessels),
            "invoices" => Ok(Feature::Invoices),
            "userManagement" => Ok(Feature::UserManagement),
            "systemSettings" => Ok(Feature::SystemSettings),
            "reports" => Ok(Feature::Reports),
            "exportData" => Ok(Feature::ExportData),
            "activityLogs" => Ok(Feature::ActivityLogs),
            _ => Err(format!("Invalid feature: {}", s)),
        }
    }
}

/// Set of acceptable roles for a `has_role` check
///
/// Normalizes the "one role or several" parameter shape at the API boundary;
/// construct a singleton with `RoleSet::from(role)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(HashSet<Role>);

impl RoleSet {
    /// Empty set; matches no identity
    pub fn new() -> Self {
        Self::default()
    }

    /// Check membership
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of roles in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        Self(HashSet::from([role]))
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
