//! Activity log models

use super::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Activity log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Entry metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Acting user, if any (sign-in failures carry none)
    pub user_id: Option<Uuid>,
    /// What kind of action happened
    pub action: ActivityAction,
    /// Human-readable description of the affected entity
    pub detail: String,
}

/// Activity action tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    SignIn,
    SignOut,
    Create,
    Update,
    Delete,
    Verify,
    Export,
}

impl ActivityLog {
    /// Create a new entry
    pub fn new(user_id: Option<Uuid>, action: ActivityAction, detail: impl Into<String>) -> Self {
        Self {
            metadata: Metadata::new(),
            user_id,
            action,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_creation() {
        let actor = Uuid::new_v4();
        let entry = ActivityLog::new(Some(actor), ActivityAction::Create, "vessel KM Sinar Jaya");
        assert_eq!(entry.user_id, Some(actor));
        assert_eq!(entry.action, ActivityAction::Create);
    }
}
