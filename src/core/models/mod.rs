//! Core data models for the dashboard service
//!
//! This module defines the persisted entities served by the dashboard.

pub mod activity;
pub mod bastp;
pub mod progress;
pub mod settings;
pub mod user;
pub mod vessel;
pub mod work_order;

// Re-export commonly used types
pub use activity::*;
pub use bastp::*;
pub use progress::*;
pub use settings::*;
pub use user::*;
pub use vessel::*;
pub use work_order::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Common metadata for all persisted models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Unique identifier
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Version for optimistic locking
    pub version: i64,
}

impl Default for Metadata {
    fn default() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }
}

impl Metadata {
    /// Create new metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the timestamp and increment version
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_touch() {
        let mut meta = Metadata::new();
        let before = meta.updated_at;
        meta.touch();
        assert_eq!(meta.version, 2);
        assert!(meta.updated_at >= before);
    }
}
