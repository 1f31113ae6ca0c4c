//! Vessel models
//!
//! Vessels are the top-level entity every work order hangs off.

use super::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vessel under repair or maintenance at the yard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    /// Vessel metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Vessel name
    pub name: String,
    /// Registry / IMO-style number (unique)
    pub registry_number: String,
    /// Owning company
    pub owner: String,
    /// Vessel type
    pub vessel_type: VesselType,
    /// Docking status
    pub status: DockingStatus,
    /// Arrival date at the yard
    pub arrived_on: Option<chrono::NaiveDate>,
    /// Departure date from the yard
    pub departed_on: Option<chrono::NaiveDate>,
}

/// Vessel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselType {
    Tugboat,
    Barge,
    Tanker,
    Cargo,
    Ferry,
    Other,
}

impl std::fmt::Display for VesselType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            VesselType::Tugboat => "tugboat",
            VesselType::Barge => "barge",
            VesselType::Tanker => "tanker",
            VesselType::Cargo => "cargo",
            VesselType::Ferry => "ferry",
            VesselType::Other => "other",
        };
        write!(f, "{}", tag)
    }
}

/// Docking status of a vessel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockingStatus {
    /// Announced but not yet arrived
    Expected,
    /// Currently at the yard
    Docked,
    /// Work finished, vessel has left
    Departed,
}

impl std::fmt::Display for DockingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            DockingStatus::Expected => "expected",
            DockingStatus::Docked => "docked",
            DockingStatus::Departed => "departed",
        };
        write!(f, "{}", tag)
    }
}

impl Vessel {
    /// Get vessel ID
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    /// Check whether the vessel is currently at the yard
    pub fn is_docked(&self) -> bool {
        matches!(self.status, DockingStatus::Docked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vessel() -> Vessel {
        Vessel {
            metadata: Metadata::new(),
            name: "KM Sinar Jaya".to_string(),
            registry_number: "IMO-9876543".to_string(),
            owner: "PT Pelayaran Nusantara".to_string(),
            vessel_type: VesselType::Cargo,
            status: DockingStatus::Docked,
            arrived_on: None,
            departed_on: None,
        }
    }

    #[test]
    fn test_docked_check() {
        let mut vessel = sample_vessel();
        assert!(vessel.is_docked());

        vessel.status = DockingStatus::Departed;
        assert!(!vessel.is_docked());
    }
}
