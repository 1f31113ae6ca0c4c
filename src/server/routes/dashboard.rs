//! Dashboard summary endpoint
//!
//! All counters are derived in memory from current rows; nothing here is
//! persisted.

use crate::auth::Feature;
use crate::core::models::VerificationStatus;
use crate::server::AppState;
use crate::server::routes::{ApiResponse, current_identity, view_denied};
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

/// Configure dashboard routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/dashboard").route("/summary", web::get().to(summary)));
}

/// Derived dashboard counters
#[derive(Debug, Serialize)]
struct DashboardSummary {
    vessels_total: usize,
    vessels_docked: usize,
    work_orders_total: usize,
    work_orders_open: usize,
    details_pending_verification: usize,
    bastp_total: usize,
    bastp_available_for_invoicing: usize,
    invoices_total: usize,
}

async fn summary(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::Dashboard) {
        return Ok(denied);
    }

    let db = state.storage.db();

    let vessels = db.list_vessels().await?;
    let orders = db.list_work_orders(None).await?;
    let bastp = db.list_bastp(false).await?;
    let invoices = db.list_invoices().await?;

    let mut details_pending_verification = 0;
    for order in &orders {
        let details = db.list_work_details(order.id()).await?;
        details_pending_verification += details
            .iter()
            .filter(|d| d.progress_percent > 0 && d.verification == VerificationStatus::Pending)
            .count();
    }

    let summary = DashboardSummary {
        vessels_total: vessels.len(),
        vessels_docked: vessels.iter().filter(|v| v.is_docked()).count(),
        work_orders_total: orders.len(),
        work_orders_open: orders.iter().filter(|o| o.is_open()).count(),
        details_pending_verification,
        bastp_total: bastp.len(),
        bastp_available_for_invoicing: bastp
            .iter()
            .filter(|b| b.available_for_invoicing())
            .count(),
        invoices_total: invoices.len(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}
