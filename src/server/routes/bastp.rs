//! BASTP certificate endpoints
//!
//! A certificate can only be issued once every line item of the work order
//! is complete and verified; issuing one moves the order to completed.

use crate::auth::Feature;
use crate::core::models::{ActivityAction, Bastp, Metadata, WorkOrderStatus};
use crate::server::AppState;
use crate::server::routes::{
    ApiResponse, current_identity, mutation_denied, record_activity, view_denied,
};
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Configure BASTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bastp")
            .route("", web::get().to(list_bastp))
            .route("", web::post().to(create_bastp))
            .route("/{id}", web::get().to(get_bastp)),
    );
}

/// List filter
#[derive(Debug, Deserialize)]
struct BastpQuery {
    /// Restrict to certificates still available for invoicing
    #[serde(default)]
    available: bool,
}

/// BASTP create request
#[derive(Debug, Deserialize)]
struct CreateBastpRequest {
    work_order_id: Uuid,
    certificate_number: String,
    issued_on: chrono::NaiveDate,
    contractor_signatory: String,
    owner_signatory: String,
}

async fn list_bastp(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<BastpQuery>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::Bastp) {
        return Ok(denied);
    }

    let certificates = state.storage.db().list_bastp(query.available).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(certificates)))
}

async fn get_bastp(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::Bastp) {
        return Ok(denied);
    }

    match state.storage.db().find_bastp(*path).await? {
        Some(bastp) => Ok(HttpResponse::Ok().json(ApiResponse::success(bastp))),
        None => {
            Ok(HttpResponse::NotFound()
                .json(ApiResponse::<()>::error("BASTP not found".to_string())))
        }
    }
}

async fn create_bastp(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CreateBastpRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::Bastp) {
        return Ok(denied);
    }

    let request = request.into_inner();
    if request.certificate_number.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "Certificate number is required".to_string(),
        )));
    }

    let Some(mut order) = state
        .storage
        .db()
        .find_work_order(request.work_order_id)
        .await?
    else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work order not found".to_string())));
    };

    let details = state.storage.db().list_work_details(order.id()).await?;
    if details.is_empty() || !details.iter().all(|detail| detail.is_complete()) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(
            "Every line item must be complete and verified before a BASTP can be issued"
                .to_string(),
        )));
    }

    let bastp = Bastp {
        metadata: Metadata::new(),
        work_order_id: order.id(),
        certificate_number: request.certificate_number,
        issued_on: request.issued_on,
        contractor_signatory: request.contractor_signatory,
        owner_signatory: request.owner_signatory,
        invoiced: false,
    };
    let bastp = state.storage.db().create_bastp(&bastp).await?;

    order.status = WorkOrderStatus::Completed;
    order.metadata.touch();
    state.storage.db().update_work_order(&order).await?;

    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Create,
        format!("BASTP {}", bastp.certificate_number),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(bastp)))
}
