//! BASTP certificates and invoices
//!
//! A BASTP is the work-completion certificate signed off by both parties
//! once a work order is done; invoices are derived from uninvoiced BASTP.
//! No monetary amounts are modeled here.

use super::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Work-completion certificate (BASTP)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bastp {
    /// Certificate metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Work order this certificate closes out
    pub work_order_id: Uuid,
    /// Certificate number (unique)
    pub certificate_number: String,
    /// Issue date
    pub issued_on: chrono::NaiveDate,
    /// Signatory on the yard side
    pub contractor_signatory: String,
    /// Signatory on the vessel-owner side
    pub owner_signatory: String,
    /// Whether an invoice has been raised against this certificate
    pub invoiced: bool,
}

/// Invoice derived from a BASTP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// BASTP the invoice is raised against
    pub bastp_id: Uuid,
    /// Invoice number (unique)
    pub invoice_number: String,
    /// Issue date
    pub issued_on: chrono::NaiveDate,
    /// Invoice status
    pub status: InvoiceStatus,
}

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
}

impl Bastp {
    /// Get certificate ID
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    /// Check whether the certificate is still available for invoicing
    pub fn available_for_invoicing(&self) -> bool {
        !self.invoiced
    }
}

impl Invoice {
    /// Get invoice ID
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoicing_availability() {
        let mut bastp = Bastp {
            metadata: Metadata::new(),
            work_order_id: Uuid::new_v4(),
            certificate_number: "BASTP-2024-007".to_string(),
            issued_on: chrono::NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            contractor_signatory: "Yard Manager".to_string(),
            owner_signatory: "Owner Representative".to_string(),
            invoiced: false,
        };
        assert!(bastp.available_for_invoicing());

        bastp.invoiced = true;
        assert!(!bastp.available_for_invoicing());
    }
}
