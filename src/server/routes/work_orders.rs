//! Work order endpoints
//!
//! Work orders are served with their derived completion percent; the value
//! is computed from detail rows on every read, never persisted.

use crate::auth::Feature;
use crate::core::models::{
    ActivityAction, Metadata, VerificationStatus, WorkDetail, WorkOrder, WorkOrderStatus,
    completion_percent,
};
use crate::server::AppState;
use crate::server::routes::{
    ApiResponse, current_identity, mutation_denied, record_activity, view_denied,
};
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configure work order routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/work-orders")
            .route("", web::get().to(list_work_orders))
            .route("", web::post().to(create_work_order))
            .route("/{id}", web::get().to(get_work_order))
            .route("/{id}", web::put().to(update_work_order))
            .route("/{id}", web::delete().to(delete_work_order))
            .route("/{id}/details", web::get().to(list_details))
            .route("/{id}/details", web::post().to(create_detail)),
    );
}

/// List filter
#[derive(Debug, Deserialize)]
struct WorkOrderQuery {
    vessel_id: Option<Uuid>,
}

/// Work order create request
#[derive(Debug, Deserialize)]
struct CreateWorkOrderRequest {
    vessel_id: Uuid,
    order_number: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    starts_on: Option<chrono::NaiveDate>,
    #[serde(default)]
    ends_on: Option<chrono::NaiveDate>,
}

/// Work order update request; absent fields stay unchanged
#[derive(Debug, Deserialize)]
struct UpdateWorkOrderRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<WorkOrderStatus>,
    starts_on: Option<chrono::NaiveDate>,
    ends_on: Option<chrono::NaiveDate>,
}

/// Work detail create request
#[derive(Debug, Deserialize)]
struct CreateDetailRequest {
    description: String,
    #[serde(default)]
    location: Option<String>,
    quantity: f64,
    unit: String,
}

/// Work order with derived fields
#[derive(Debug, Serialize)]
struct WorkOrderResponse {
    #[serde(flatten)]
    order: WorkOrder,
    /// Mean progress across line items
    completion_percent: f64,
    /// Number of line items
    detail_count: usize,
}

impl WorkOrderResponse {
    fn new(order: WorkOrder, details: &[WorkDetail]) -> Self {
        Self {
            completion_percent: completion_percent(details),
            detail_count: details.len(),
            order,
        }
    }
}

async fn with_derived(state: &AppState, order: WorkOrder) -> Result<WorkOrderResponse> {
    let details = state.storage.db().list_work_details(order.id()).await?;
    Ok(WorkOrderResponse::new(order, &details))
}

async fn list_work_orders(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<WorkOrderQuery>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::WorkOrders) {
        return Ok(denied);
    }

    let orders = state.storage.db().list_work_orders(query.vessel_id).await?;
    let mut rows = Vec::with_capacity(orders.len());
    for order in orders {
        rows.push(with_derived(&state, order).await?);
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success(rows)))
}

async fn get_work_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::WorkOrders) {
        return Ok(denied);
    }

    match state.storage.db().find_work_order(*path).await? {
        Some(order) => {
            let row = with_derived(&state, order).await?;
            Ok(HttpResponse::Ok().json(ApiResponse::success(row)))
        }
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work order not found".to_string()))),
    }
}

async fn create_work_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CreateWorkOrderRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::WorkOrders) {
        return Ok(denied);
    }

    let request = request.into_inner();
    if request.order_number.is_empty() || request.title.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "Order number and title are required".to_string(),
        )));
    }

    if state.storage.db().find_vessel(request.vessel_id).await?.is_none() {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Vessel not found".to_string())));
    }

    let order = WorkOrder {
        metadata: Metadata::new(),
        vessel_id: request.vessel_id,
        order_number: request.order_number,
        title: request.title,
        description: request.description,
        status: WorkOrderStatus::Open,
        starts_on: request.starts_on,
        ends_on: request.ends_on,
    };

    let order = state.storage.db().create_work_order(&order).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Create,
        format!("work order {}", order.order_number),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(WorkOrderResponse::new(order, &[]))))
}

async fn update_work_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateWorkOrderRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::WorkOrders) {
        return Ok(denied);
    }

    let Some(mut order) = state.storage.db().find_work_order(*path).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work order not found".to_string())));
    };

    let request = request.into_inner();
    if let Some(title) = request.title {
        order.title = title;
    }
    if let Some(description) = request.description {
        order.description = description;
    }
    if let Some(status) = request.status {
        order.status = status;
    }
    if let Some(starts_on) = request.starts_on {
        order.starts_on = Some(starts_on);
    }
    if let Some(ends_on) = request.ends_on {
        order.ends_on = Some(ends_on);
    }
    order.metadata.touch();

    let order = state.storage.db().update_work_order(&order).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Update,
        format!("work order {}", order.order_number),
    )
    .await;

    let row = with_derived(&state, order).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(row)))
}

async fn delete_work_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::WorkOrders) {
        return Ok(denied);
    }

    let Some(order) = state.storage.db().find_work_order(*path).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work order not found".to_string())));
    };

    let details = state.storage.db().list_work_details(order.id()).await?;
    if !details.is_empty() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(
            "Work order has detail line items and cannot be deleted".to_string(),
        )));
    }

    state.storage.db().delete_work_order(order.id()).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Delete,
        format!("work order {}", order.order_number),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Work order deleted")))
}

async fn list_details(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::WorkDetails) {
        return Ok(denied);
    }

    if state.storage.db().find_work_order(*path).await?.is_none() {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work order not found".to_string())));
    }

    let details = state.storage.db().list_work_details(*path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(details)))
}

async fn create_detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<CreateDetailRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::WorkDetails) {
        return Ok(denied);
    }

    let Some(order) = state.storage.db().find_work_order(*path).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Work order not found".to_string())));
    };

    let request = request.into_inner();
    if request.description.is_empty() || request.unit.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "Description and unit are required".to_string(),
        )));
    }

    let existing = state.storage.db().list_work_details(order.id()).await?;
    let detail = WorkDetail {
        metadata: Metadata::new(),
        work_order_id: order.id(),
        line_number: existing.len() as u32 + 1,
        description: request.description,
        location: request.location,
        quantity: request.quantity,
        unit: request.unit,
        progress_percent: 0,
        verification: VerificationStatus::Pending,
    };

    let detail = state.storage.db().create_work_detail(&detail).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Create,
        format!(
            "work detail {}#{}",
            order.order_number, detail.line_number
        ),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(detail)))
}
