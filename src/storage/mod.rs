//! Storage layer for the dashboard service
//!
//! The persistence boundary is an opaque row store: entities addressed by
//! id with a handful of filter parameters. Screens never see anything
//! richer than "rows matching a filter", so neither does this trait.

pub mod memory;

use crate::config::StorageConfig;
use crate::core::models::{
    ActivityLog, Bastp, Invoice, ProgressReport, SystemSettings, User, Vessel, WorkDetail,
    WorkOrder,
};
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Row-store contract consumed by the service
///
/// List operations return rows ordered by creation time so responses are
/// deterministic.
#[async_trait]
pub trait Database: Send + Sync {
    // Users
    async fn create_user(&self, user: &User) -> Result<User>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn update_user(&self, user: &User) -> Result<User>;
    async fn delete_user(&self, id: Uuid) -> Result<()>;
    async fn update_user_last_login(&self, id: Uuid) -> Result<()>;

    // Vessels
    async fn create_vessel(&self, vessel: &Vessel) -> Result<Vessel>;
    async fn find_vessel(&self, id: Uuid) -> Result<Option<Vessel>>;
    async fn list_vessels(&self) -> Result<Vec<Vessel>>;
    async fn update_vessel(&self, vessel: &Vessel) -> Result<Vessel>;
    async fn delete_vessel(&self, id: Uuid) -> Result<()>;

    // Work orders
    async fn create_work_order(&self, order: &WorkOrder) -> Result<WorkOrder>;
    async fn find_work_order(&self, id: Uuid) -> Result<Option<WorkOrder>>;
    async fn list_work_orders(&self, vessel_id: Option<Uuid>) -> Result<Vec<WorkOrder>>;
    async fn update_work_order(&self, order: &WorkOrder) -> Result<WorkOrder>;
    async fn delete_work_order(&self, id: Uuid) -> Result<()>;

    // Work details
    async fn create_work_detail(&self, detail: &WorkDetail) -> Result<WorkDetail>;
    async fn find_work_detail(&self, id: Uuid) -> Result<Option<WorkDetail>>;
    async fn list_work_details(&self, work_order_id: Uuid) -> Result<Vec<WorkDetail>>;
    async fn update_work_detail(&self, detail: &WorkDetail) -> Result<WorkDetail>;
    async fn delete_work_detail(&self, id: Uuid) -> Result<()>;

    // Progress reports
    async fn create_progress_report(&self, report: &ProgressReport) -> Result<ProgressReport>;
    async fn list_progress_reports(&self, work_detail_id: Uuid) -> Result<Vec<ProgressReport>>;

    // BASTP certificates
    async fn create_bastp(&self, bastp: &Bastp) -> Result<Bastp>;
    async fn find_bastp(&self, id: Uuid) -> Result<Option<Bastp>>;
    async fn list_bastp(&self, uninvoiced_only: bool) -> Result<Vec<Bastp>>;
    async fn update_bastp(&self, bastp: &Bastp) -> Result<Bastp>;

    // Invoices
    async fn create_invoice(&self, invoice: &Invoice) -> Result<Invoice>;
    async fn find_invoice(&self, id: Uuid) -> Result<Option<Invoice>>;
    async fn list_invoices(&self) -> Result<Vec<Invoice>>;
    async fn update_invoice(&self, invoice: &Invoice) -> Result<Invoice>;

    // Activity log
    async fn append_activity(&self, entry: &ActivityLog) -> Result<ActivityLog>;
    async fn list_activity(&self, limit: usize) -> Result<Vec<ActivityLog>>;

    // System settings
    async fn load_settings(&self) -> Result<SystemSettings>;
    async fn store_settings(&self, settings: &SystemSettings) -> Result<SystemSettings>;
}

/// Storage layer wrapping the configured backend
#[derive(Clone)]
pub struct StorageLayer {
    database: Arc<dyn Database>,
}

impl StorageLayer {
    /// Create a storage layer from configuration
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer: {}", config.backend);

        match config.backend.as_str() {
            "memory" => Ok(Self::memory()),
            other => Err(DashboardError::config(format!(
                "Unknown storage backend: {}",
                other
            ))),
        }
    }

    /// In-process storage layer
    pub fn memory() -> Self {
        Self {
            database: Arc::new(memory::MemoryDatabase::new()),
        }
    }

    /// Get the database handle
    pub fn db(&self) -> &dyn Database {
        self.database.as_ref()
    }
}
