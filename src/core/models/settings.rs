//! System settings model

use serde::{Deserialize, Serialize};

/// Yard-wide settings, editable only through the systemSettings feature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSettings {
    /// Display name of the shipyard
    pub shipyard_name: String,
    /// Prefix used when numbering new work orders
    pub work_order_prefix: String,
    /// Prefix used when numbering new BASTP certificates
    pub bastp_prefix: String,
    /// Prefix used when numbering new invoices
    pub invoice_prefix: String,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            shipyard_name: "Shipyard Operations".to_string(),
            work_order_prefix: "WO".to_string(),
            bastp_prefix: "BASTP".to_string(),
            invoice_prefix: "INV".to_string(),
        }
    }
}
