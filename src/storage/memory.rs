//! In-process row store
//!
//! Reference backend for the `Database` trait. Rows live in concurrent
//! maps keyed by id; the activity log and settings are the only
//! non-entity tables.

use super::Database;
use crate::core::models::{
    ActivityLog, Bastp, Invoice, ProgressReport, SystemSettings, User, Vessel, WorkDetail,
    WorkOrder,
};
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use uuid::Uuid;

/// In-memory database
#[derive(Default)]
pub struct MemoryDatabase {
    users: DashMap<Uuid, User>,
    vessels: DashMap<Uuid, Vessel>,
    work_orders: DashMap<Uuid, WorkOrder>,
    work_details: DashMap<Uuid, WorkDetail>,
    progress_reports: DashMap<Uuid, ProgressReport>,
    bastp: DashMap<Uuid, Bastp>,
    invoices: DashMap<Uuid, Invoice>,
    activity: RwLock<Vec<ActivityLog>>,
    settings: RwLock<Option<SystemSettings>>,
}

impl MemoryDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_creation<T, F>(rows: Vec<T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    let mut rows = rows;
    rows.sort_by_key(|row| created_at(row));
    rows
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn create_user(&self, user: &User) -> Result<User> {
        self.users.insert(user.id(), user.clone());
        Ok(user.clone())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|row| row.value().clone()))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|row| row.value().username == username)
            .map(|row| row.value().clone()))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows = self.users.iter().map(|row| row.value().clone()).collect();
        Ok(sorted_by_creation(rows, |u: &User| u.metadata.created_at))
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        if !self.users.contains_key(&user.id()) {
            return Err(DashboardError::not_found("User not found"));
        }
        self.users.insert(user.id(), user.clone());
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        self.users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DashboardError::not_found("User not found"))
    }

    async fn update_user_last_login(&self, id: Uuid) -> Result<()> {
        let mut row = self
            .users
            .get_mut(&id)
            .ok_or_else(|| DashboardError::not_found("User not found"))?;
        row.update_last_login();
        Ok(())
    }

    async fn create_vessel(&self, vessel: &Vessel) -> Result<Vessel> {
        self.vessels.insert(vessel.id(), vessel.clone());
        Ok(vessel.clone())
    }

    async fn find_vessel(&self, id: Uuid) -> Result<Option<Vessel>> {
        Ok(self.vessels.get(&id).map(|row| row.value().clone()))
    }

    async fn list_vessels(&self) -> Result<Vec<Vessel>> {
        let rows = self.vessels.iter().map(|row| row.value().clone()).collect();
        Ok(sorted_by_creation(rows, |v: &Vessel| v.metadata.created_at))
    }

    async fn update_vessel(&self, vessel: &Vessel) -> Result<Vessel> {
        if !self.vessels.contains_key(&vessel.id()) {
            return Err(DashboardError::not_found("Vessel not found"));
        }
        self.vessels.insert(vessel.id(), vessel.clone());
        Ok(vessel.clone())
    }

    async fn delete_vessel(&self, id: Uuid) -> Result<()> {
        self.vessels
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DashboardError::not_found("Vessel not found"))
    }

    async fn create_work_order(&self, order: &WorkOrder) -> Result<WorkOrder> {
        self.work_orders.insert(order.id(), order.clone());
        Ok(order.clone())
    }

    async fn find_work_order(&self, id: Uuid) -> Result<Option<WorkOrder>> {
        Ok(self.work_orders.get(&id).map(|row| row.value().clone()))
    }

    async fn list_work_orders(&self, vessel_id: Option<Uuid>) -> Result<Vec<WorkOrder>> {
        let rows = self
            .work_orders
            .iter()
            .map(|row| row.value().clone())
            .filter(|order| vessel_id.is_none_or(|id| order.vessel_id == id))
            .collect();
        Ok(sorted_by_creation(rows, |o: &WorkOrder| {
            o.metadata.created_at
        }))
    }

    async fn update_work_order(&self, order: &WorkOrder) -> Result<WorkOrder> {
        if !self.work_orders.contains_key(&order.id()) {
            return Err(DashboardError::not_found("Work order not found"));
        }
        self.work_orders.insert(order.id(), order.clone());
        Ok(order.clone())
    }

    async fn delete_work_order(&self, id: Uuid) -> Result<()> {
        self.work_orders
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DashboardError::not_found("Work order not found"))
    }

    async fn create_work_detail(&self, detail: &WorkDetail) -> Result<WorkDetail> {
        self.work_details.insert(detail.id(), detail.clone());
        Ok(detail.clone())
    }

    async fn find_work_detail(&self, id: Uuid) -> Result<Option<WorkDetail>> {
        Ok(self.work_details.get(&id).map(|row| row.value().clone()))
    }

    async fn list_work_details(&self, work_order_id: Uuid) -> Result<Vec<WorkDetail>> {
        let rows = self
            .work_details
            .iter()
            .map(|row| row.value().clone())
            .filter(|detail| detail.work_order_id == work_order_id)
            .collect();
        Ok(sorted_by_creation(rows, |d: &WorkDetail| {
            d.metadata.created_at
        }))
    }

    async fn update_work_detail(&self, detail: &WorkDetail) -> Result<WorkDetail> {
        if !self.work_details.contains_key(&detail.id()) {
            return Err(DashboardError::not_found("Work detail not found"));
        }
        self.work_details.insert(detail.id(), detail.clone());
        Ok(detail.clone())
    }

    async fn delete_work_detail(&self, id: Uuid) -> Result<()> {
        self.work_details
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DashboardError::not_found("Work detail not found"))
    }

    async fn create_progress_report(&self, report: &ProgressReport) -> Result<ProgressReport> {
        self.progress_reports.insert(report.id(), report.clone());
        Ok(report.clone())
    }

    async fn list_progress_reports(&self, work_detail_id: Uuid) -> Result<Vec<ProgressReport>> {
        let rows = self
            .progress_reports
            .iter()
            .map(|row| row.value().clone())
            .filter(|report| report.work_detail_id == work_detail_id)
            .collect();
        Ok(sorted_by_creation(rows, |r: &ProgressReport| {
            r.metadata.created_at
        }))
    }

    async fn create_bastp(&self, bastp: &Bastp) -> Result<Bastp> {
        self.bastp.insert(bastp.id(), bastp.clone());
        Ok(bastp.clone())
    }

    async fn find_bastp(&self, id: Uuid) -> Result<Option<Bastp>> {
        Ok(self.bastp.get(&id).map(|row| row.value().clone()))
    }

    async fn list_bastp(&self, uninvoiced_only: bool) -> Result<Vec<Bastp>> {
        let rows = self
            .bastp
            .iter()
            .map(|row| row.value().clone())
            .filter(|bastp| !uninvoiced_only || bastp.available_for_invoicing())
            .collect();
        Ok(sorted_by_creation(rows, |b: &Bastp| b.metadata.created_at))
    }

    async fn update_bastp(&self, bastp: &Bastp) -> Result<Bastp> {
        if !self.bastp.contains_key(&bastp.id()) {
            return Err(DashboardError::not_found("BASTP not found"));
        }
        self.bastp.insert(bastp.id(), bastp.clone());
        Ok(bastp.clone())
    }

    async fn create_invoice(&self, invoice: &Invoice) -> Result<Invoice> {
        self.invoices.insert(invoice.id(), invoice.clone());
        Ok(invoice.clone())
    }

    async fn find_invoice(&self, id: Uuid) -> Result<Option<Invoice>> {
        Ok(self.invoices.get(&id).map(|row| row.value().clone()))
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        let rows = self.invoices.iter().map(|row| row.value().clone()).collect();
        Ok(sorted_by_creation(rows, |i: &Invoice| i.metadata.created_at))
    }

    async fn update_invoice(&self, invoice: &Invoice) -> Result<Invoice> {
        if !self.invoices.contains_key(&invoice.id()) {
            return Err(DashboardError::not_found("Invoice not found"));
        }
        self.invoices.insert(invoice.id(), invoice.clone());
        Ok(invoice.clone())
    }

    async fn append_activity(&self, entry: &ActivityLog) -> Result<ActivityLog> {
        self.activity.write().push(entry.clone());
        Ok(entry.clone())
    }

    async fn list_activity(&self, limit: usize) -> Result<Vec<ActivityLog>> {
        let activity = self.activity.read();
        // Newest first
        Ok(activity.iter().rev().take(limit).cloned().collect())
    }

    async fn load_settings(&self) -> Result<SystemSettings> {
        Ok(self.settings.read().clone().unwrap_or_default())
    }

    async fn store_settings(&self, settings: &SystemSettings) -> Result<SystemSettings> {
        *self.settings.write() = Some(settings.clone());
        Ok(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ActivityAction, Metadata, Role, VesselType};
    use crate::core::models::{DockingStatus, WorkOrderStatus};

    fn vessel(name: &str) -> Vessel {
        Vessel {
            metadata: Metadata::new(),
            name: name.to_string(),
            registry_number: format!("REG-{}", name),
            owner: "PT Pelayaran Nusantara".to_string(),
            vessel_type: VesselType::Barge,
            status: DockingStatus::Docked,
            arrived_on: None,
            departed_on: None,
        }
    }

    #[tokio::test]
    async fn test_user_round_trip() {
        let db = MemoryDatabase::new();
        let user = User::new(
            "admin".to_string(),
            "admin@shipyard.example".to_string(),
            "hash".to_string(),
            Role::Admin,
        );

        db.create_user(&user).await.unwrap();
        assert!(db.find_user_by_id(user.id()).await.unwrap().is_some());
        assert!(
            db.find_user_by_username("admin")
                .await
                .unwrap()
                .is_some()
        );

        db.delete_user(user.id()).await.unwrap();
        assert!(db.find_user_by_id(user.id()).await.unwrap().is_none());
        assert!(db.delete_user(user.id()).await.is_err());
    }

    #[tokio::test]
    async fn test_work_order_filter_by_vessel() {
        let db = MemoryDatabase::new();
        let first = vessel("KM Satu");
        let second = vessel("KM Dua");
        db.create_vessel(&first).await.unwrap();
        db.create_vessel(&second).await.unwrap();

        for (vessel_id, number) in [(first.id(), "WO-1"), (first.id(), "WO-2"), (second.id(), "WO-3")] {
            let order = WorkOrder {
                metadata: Metadata::new(),
                vessel_id,
                order_number: number.to_string(),
                title: "Docking".to_string(),
                description: String::new(),
                status: WorkOrderStatus::Open,
                starts_on: None,
                ends_on: None,
            };
            db.create_work_order(&order).await.unwrap();
        }

        assert_eq!(db.list_work_orders(None).await.unwrap().len(), 3);
        assert_eq!(
            db.list_work_orders(Some(first.id())).await.unwrap().len(),
            2
        );
        assert_eq!(
            db.list_work_orders(Some(second.id())).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_uninvoiced_bastp_filter() {
        let db = MemoryDatabase::new();
        let mut invoiced = Bastp {
            metadata: Metadata::new(),
            work_order_id: Uuid::new_v4(),
            certificate_number: "BASTP-1".to_string(),
            issued_on: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            contractor_signatory: "Yard".to_string(),
            owner_signatory: "Owner".to_string(),
            invoiced: false,
        };
        let open = Bastp {
            metadata: Metadata::new(),
            certificate_number: "BASTP-2".to_string(),
            ..invoiced.clone()
        };

        invoiced.invoiced = true;
        db.create_bastp(&invoiced).await.unwrap();
        db.create_bastp(&open).await.unwrap();

        assert_eq!(db.list_bastp(false).await.unwrap().len(), 2);
        let available = db.list_bastp(true).await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].certificate_number, "BASTP-2");
    }

    #[tokio::test]
    async fn test_activity_is_newest_first_and_limited() {
        let db = MemoryDatabase::new();
        for i in 0..5 {
            let entry = ActivityLog::new(None, ActivityAction::Create, format!("entry {}", i));
            db.append_activity(&entry).await.unwrap();
        }

        let recent = db.list_activity(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].detail, "entry 4");
    }

    #[tokio::test]
    async fn test_settings_default_until_stored() {
        let db = MemoryDatabase::new();
        let settings = db.load_settings().await.unwrap();
        assert_eq!(settings.shipyard_name, "Shipyard Operations");

        let mut updated = settings;
        updated.shipyard_name = "PT Dok Nusantara".to_string();
        db.store_settings(&updated).await.unwrap();

        assert_eq!(
            db.load_settings().await.unwrap().shipyard_name,
            "PT Dok Nusantara"
        );
    }
}
