//! Work order and work detail models
//!
//! A work order groups the repair scope for one vessel; work details are its
//! line items. Completion is derived in memory from detail progress, never
//! persisted.

use super::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Work order for a vessel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Work order metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Vessel this order belongs to
    pub vessel_id: Uuid,
    /// Order number (unique)
    pub order_number: String,
    /// Short title
    pub title: String,
    /// Scope description
    pub description: String,
    /// Order status
    pub status: WorkOrderStatus,
    /// Planned start date
    pub starts_on: Option<chrono::NaiveDate>,
    /// Planned end date
    pub ends_on: Option<chrono::NaiveDate>,
}

/// Work order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Draft,
    Open,
    InProgress,
    Completed,
    Closed,
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            WorkOrderStatus::Draft => "draft",
            WorkOrderStatus::Open => "open",
            WorkOrderStatus::InProgress => "in_progress",
            WorkOrderStatus::Completed => "completed",
            WorkOrderStatus::Closed => "closed",
        };
        write!(f, "{}", tag)
    }
}

/// Work-detail line item of a work order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkDetail {
    /// Work detail metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Parent work order
    pub work_order_id: Uuid,
    /// Line number within the order
    pub line_number: u32,
    /// Work description
    pub description: String,
    /// Location on the vessel (e.g. "main deck", "engine room")
    pub location: Option<String>,
    /// Quantity of work
    pub quantity: f64,
    /// Unit of the quantity (e.g. "m2", "unit")
    pub unit: String,
    /// Latest claimed progress, 0-100
    pub progress_percent: u8,
    /// Verification status of the latest progress claim
    pub verification: VerificationStatus,
}

/// Verification status of a work-detail progress claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Awaiting verification
    Pending,
    /// Verified by yard operations
    Verified,
    /// Rejected, progress claim not accepted
    Rejected,
}

impl WorkOrder {
    /// Get work order ID
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    /// Check whether the order accepts new progress reports
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            WorkOrderStatus::Open | WorkOrderStatus::InProgress
        )
    }
}

impl WorkDetail {
    /// Get work detail ID
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    /// Check whether the line item has been verified as complete
    pub fn is_complete(&self) -> bool {
        self.progress_percent == 100 && matches!(self.verification, VerificationStatus::Verified)
    }
}

/// Mean progress across a work order's line items, 0.0 when there are none
pub fn completion_percent(details: &[WorkDetail]) -> f64 {
    if details.is_empty() {
        return 0.0;
    }
    let total: u32 = details.iter().map(|d| u32::from(d.progress_percent)).sum();
    f64::from(total) / details.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(progress: u8, verification: VerificationStatus) -> WorkDetail {
        WorkDetail {
            metadata: Metadata::new(),
            work_order_id: Uuid::new_v4(),
            line_number: 1,
            description: "Hull plate replacement".to_string(),
            location: Some("port side".to_string()),
            quantity: 12.0,
            unit: "m2".to_string(),
            progress_percent: progress,
            verification,
        }
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(&[]), 0.0);

        let details = vec![
            detail(100, VerificationStatus::Verified),
            detail(50, VerificationStatus::Pending),
            detail(0, VerificationStatus::Pending),
        ];
        assert_eq!(completion_percent(&details), 50.0);
    }

    #[test]
    fn test_detail_completeness() {
        assert!(detail(100, VerificationStatus::Verified).is_complete());
        assert!(!detail(100, VerificationStatus::Pending).is_complete());
        assert!(!detail(90, VerificationStatus::Verified).is_complete());
    }

    #[test]
    fn test_order_openness() {
        let mut order = WorkOrder {
            metadata: Metadata::new(),
            vessel_id: Uuid::new_v4(),
            order_number: "WO-2024-001".to_string(),
            title: "Annual docking".to_string(),
            description: "Full hull survey and repaint".to_string(),
            status: WorkOrderStatus::Open,
            starts_on: None,
            ends_on: None,
        };
        assert!(order.is_open());

        order.status = WorkOrderStatus::Closed;
        assert!(!order.is_open());
    }
}
