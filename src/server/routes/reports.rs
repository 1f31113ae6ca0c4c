//! Report and CSV export endpoints
//!
//! Reports join work orders against vessels, details and certificates and
//! derive completion in memory. Exports render the same listings as CSV;
//! reports and exports are separate features with separate gates.

use crate::auth::Feature;
use crate::core::models::{ActivityAction, WorkOrderStatus, completion_percent};
use crate::server::AppState;
use crate::server::routes::{ApiResponse, current_identity, record_activity, view_denied};
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Configure report and export routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reports").route("/work-orders", web::get().to(work_order_report)));
    cfg.service(
        web::scope("/export")
            .route("/vessels.csv", web::get().to(export_vessels))
            .route("/work-orders.csv", web::get().to(export_work_orders)),
    );
}

/// One row of the work-order report
#[derive(Debug, Serialize)]
struct WorkOrderReportRow {
    work_order_id: Uuid,
    order_number: String,
    title: String,
    vessel_name: String,
    status: WorkOrderStatus,
    detail_count: usize,
    completion_percent: f64,
    bastp_issued: bool,
}

async fn build_report_rows(state: &AppState) -> Result<Vec<WorkOrderReportRow>> {
    let db = state.storage.db();

    let orders = db.list_work_orders(None).await?;
    let vessel_names: HashMap<Uuid, String> = db
        .list_vessels()
        .await?
        .into_iter()
        .map(|vessel| (vessel.id(), vessel.name))
        .collect();
    let certified: HashSet<Uuid> = db
        .list_bastp(false)
        .await?
        .into_iter()
        .map(|bastp| bastp.work_order_id)
        .collect();

    let mut rows = Vec::with_capacity(orders.len());
    for order in orders {
        let details = db.list_work_details(order.id()).await?;
        rows.push(WorkOrderReportRow {
            work_order_id: order.id(),
            vessel_name: vessel_names
                .get(&order.vessel_id)
                .cloned()
                .unwrap_or_default(),
            status: order.status,
            detail_count: details.len(),
            completion_percent: completion_percent(&details),
            bastp_issued: certified.contains(&order.id()),
            order_number: order.order_number,
            title: order.title,
        });
    }
    Ok(rows)
}

async fn work_order_report(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::Reports) {
        return Ok(denied);
    }

    let rows = build_report_rows(&state).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(rows)))
}

/// Quote a CSV field when it contains separators or quotes
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

async fn export_vessels(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::ExportData) {
        return Ok(denied);
    }

    let vessels = state.storage.db().list_vessels().await?;

    let mut csv = String::from("name,registry_number,owner,vessel_type,status\n");
    for vessel in &vessels {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            csv_field(&vessel.name),
            csv_field(&vessel.registry_number),
            csv_field(&vessel.owner),
            vessel.vessel_type,
            vessel.status,
        ));
    }

    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Export,
        format!("vessels ({} rows)", vessels.len()),
    )
    .await;

    Ok(HttpResponse::Ok().content_type("text/csv").body(csv))
}

async fn export_work_orders(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::ExportData) {
        return Ok(denied);
    }

    let rows = build_report_rows(&state).await?;

    let mut csv = String::from(
        "order_number,title,vessel_name,status,detail_count,completion_percent,bastp_issued\n",
    );
    for row in &rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{:.1},{}\n",
            csv_field(&row.order_number),
            csv_field(&row.title),
            csv_field(&row.vessel_name),
            row.status,
            row.detail_count,
            row.completion_percent,
            row.bastp_issued,
        ));
    }

    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Export,
        format!("work orders ({} rows)", rows.len()),
    )
    .await;

    Ok(HttpResponse::Ok().content_type("text/csv").body(csv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
