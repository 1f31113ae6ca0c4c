//! Progress report models
//!
//! Field crews file progress reports against work details; photo evidence is
//! carried as URLs into the object store.

use super::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Progress report for a work-detail line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Report metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Work detail this report is filed against
    pub work_detail_id: Uuid,
    /// User who filed the report
    pub reported_by: Uuid,
    /// Date the work was performed
    pub report_date: chrono::NaiveDate,
    /// Claimed cumulative progress, 0-100
    pub progress_percent: u8,
    /// Free-form note
    pub note: Option<String>,
    /// Photo evidence URLs
    pub photo_urls: Vec<String>,
}

impl ProgressReport {
    /// Get report ID
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    /// Check whether the report carries photo evidence
    pub fn has_evidence(&self) -> bool {
        !self.photo_urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_check() {
        let mut report = ProgressReport {
            metadata: Metadata::new(),
            work_detail_id: Uuid::new_v4(),
            reported_by: Uuid::new_v4(),
            report_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            progress_percent: 60,
            note: None,
            photo_urls: vec![],
        };
        assert!(!report.has_evidence());

        report
            .photo_urls
            .push("https://evidence.shipyard.example/p/123.jpg".to_string());
        assert!(report.has_evidence());
    }
}
