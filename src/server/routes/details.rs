//! Work-detail, progress-report and verification endpoints
//!
//! Three features meet on this scope: workDetails governs the line items
//! themselves, progress governs the report trail, verification governs
//! acceptance of a progress claim. Each keeps its own gate.

use crate::auth::Feature;
use crate::core::models::{
    ActivityAction, Metadata, ProgressReport, VerificationStatus, WorkDetail,
};
use crate::server::AppState;
use crate::server::routes::{
    ApiResponse, current_identity, mutation_denied, record_activity, view_denied,
};
use crate::utils::error::Result;
use crate::utils::validation;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Configure work-detail routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/details")
            .route("/{id}", web::get().to(get_detail))
            .route("/{id}", web::put().to(update_detail))
            .route("/{id}", web::delete().to(delete_detail))
            .route("/{id}/progress", web::get().to(list_progress))
            .route("/{id}/progress", web::post().to(create_progress))
            .route("/{id}/verify", web::post().to(verify_detail)),
    );
}

/// Work detail update request; absent fields stay unchanged
#[derive(Debug, Deserialize)]
struct UpdateDetailRequest {
    description: Option<String>,
    location: Option<String>,
    quantity: Option<f64>,
    unit: Option<String>,
}

/// Progress report request
#[derive(Debug, Deserialize)]
struct CreateProgressRequest {
    report_date: chrono::NaiveDate,
    progress_percent: u8,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    photo_urls: Vec<String>,
}

/// Verification request
#[derive(Debug, Deserialize)]
struct VerifyRequest {
    approved: bool,
}

async fn find_detail(state: &AppState, id: Uuid) -> Result<Option<WorkDetail>> {
    state.storage.db().find_work_detail(id).await
}

async fn get_detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::WorkDetails) {
        return Ok(denied);
    }

    match find_detail(&state, *path).await? {
        Some(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail))),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work detail not found".to_string()))),
    }
}

async fn update_detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateDetailRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::WorkDetails) {
        return Ok(denied);
    }

    let Some(mut detail) = find_detail(&state, *path).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work detail not found".to_string())));
    };

    let request = request.into_inner();
    if let Some(description) = request.description {
        detail.description = description;
    }
    if let Some(location) = request.location {
        detail.location = Some(location);
    }
    if let Some(quantity) = request.quantity {
        detail.quantity = quantity;
    }
    if let Some(unit) = request.unit {
        detail.unit = unit;
    }
    detail.metadata.touch();

    let detail = state.storage.db().update_work_detail(&detail).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Update,
        format!("work detail line {}", detail.line_number),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(detail)))
}

async fn delete_detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::WorkDetails) {
        return Ok(denied);
    }

    let Some(detail) = find_detail(&state, *path).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work detail not found".to_string())));
    };

    let reports = state.storage.db().list_progress_reports(detail.id()).await?;
    if !reports.is_empty() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(
            "Work detail has progress reports and cannot be deleted".to_string(),
        )));
    }

    state.storage.db().delete_work_detail(detail.id()).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Delete,
        format!("work detail line {}", detail.line_number),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Work detail deleted")))
}

async fn list_progress(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::Progress) {
        return Ok(denied);
    }

    if find_detail(&state, *path).await?.is_none() {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work detail not found".to_string())));
    }

    let reports = state.storage.db().list_progress_reports(*path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(reports)))
}

async fn create_progress(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<CreateProgressRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::Progress) {
        return Ok(denied);
    }
    // The mutation gate only admits resolved identities
    let Some(identity) = identity else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::<()>::error("Authentication required".to_string())));
    };

    let Some(mut detail) = find_detail(&state, *path).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work detail not found".to_string())));
    };

    let request = request.into_inner();
    if let Err(e) = validation::validate_progress_percent(request.progress_percent) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())));
    }

    let Some(order) = state
        .storage
        .db()
        .find_work_order(detail.work_order_id)
        .await?
    else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work order not found".to_string())));
    };
    if !order.is_open() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(
            "Work order is not open for progress reports".to_string(),
        )));
    }

    let report = ProgressReport {
        metadata: Metadata::new(),
        work_detail_id: detail.id(),
        reported_by: identity.user_id(),
        report_date: request.report_date,
        progress_percent: request.progress_percent,
        note: request.note,
        photo_urls: request.photo_urls,
    };
    let report = state.storage.db().create_progress_report(&report).await?;

    // The latest claim drives the line item; acceptance starts over
    detail.progress_percent = report.progress_percent;
    detail.verification = VerificationStatus::Pending;
    detail.metadata.touch();
    state.storage.db().update_work_detail(&detail).await?;

    record_activity(
        &state,
        Some(&identity),
        ActivityAction::Create,
        format!(
            "progress {}% on work detail line {}",
            report.progress_percent, detail.line_number
        ),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(report)))
}

async fn verify_detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<VerifyRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::Verification) {
        return Ok(denied);
    }

    let Some(mut detail) = find_detail(&state, *path).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work detail not found".to_string())));
    };

    if detail.verification != VerificationStatus::Pending {
        return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(
            "Work detail has no pending progress claim".to_string(),
        )));
    }

    detail.verification = if request.approved {
        VerificationStatus::Verified
    } else {
        VerificationStatus::Rejected
    };
    detail.metadata.touch();

    let detail = state.storage.db().update_work_detail(&detail).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Verify,
        format!(
            "work detail line {} {}",
            detail.line_number,
            if request.approved { "verified" } else { "rejected" }
        ),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(detail)))
}
