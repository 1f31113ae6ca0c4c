//! Vessel endpoints

use crate::auth::Feature;
use crate::core::models::{ActivityAction, DockingStatus, Metadata, Vessel, VesselType};
use crate::server::AppState;
use crate::server::routes::{
    ApiResponse, current_identity, mutation_denied, record_activity, view_denied,
};
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Configure vessel routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/vessels")
            .route("", web::get().to(list_vessels))
            .route("", web::post().to(create_vessel))
            .route("/{id}", web::get().to(get_vessel))
            .route("/{id}", web::put().to(update_vessel))
            .route("/{id}", web::delete().to(delete_vessel)),
    );
}

/// Vessel create request
#[derive(Debug, Deserialize)]
struct CreateVesselRequest {
    name: String,
    registry_number: String,
    owner: String,
    vessel_type: VesselType,
    #[serde(default)]
    arrived_on: Option<chrono::NaiveDate>,
}

/// Vessel update request; absent fields stay unchanged
#[derive(Debug, Deserialize)]
struct UpdateVesselRequest {
    name: Option<String>,
    owner: Option<String>,
    vessel_type: Option<VesselType>,
    status: Option<DockingStatus>,
    arrived_on: Option<chrono::NaiveDate>,
    departed_on: Option<chrono::NaiveDate>,
}

async fn list_vessels(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::Vessels) {
        return Ok(denied);
    }

    let vessels = state.storage.db().list_vessels().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(vessels)))
}

async fn get_vessel(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::Vessels) {
        return Ok(denied);
    }

    match state.storage.db().find_vessel(*path).await? {
        Some(vessel) => Ok(HttpResponse::Ok().json(ApiResponse::success(vessel))),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Vessel not found".to_string()))),
    }
}

async fn create_vessel(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CreateVesselRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::Vessels) {
        return Ok(denied);
    }

    if request.name.is_empty() || request.registry_number.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "Vessel name and registry number are required".to_string(),
        )));
    }

    let request = request.into_inner();
    let vessel = Vessel {
        metadata: Metadata::new(),
        name: request.name,
        registry_number: request.registry_number,
        owner: request.owner,
        vessel_type: request.vessel_type,
        status: if request.arrived_on.is_some() {
            DockingStatus::Docked
        } else {
            DockingStatus::Expected
        },
        arrived_on: request.arrived_on,
        departed_on: None,
    };

    let vessel = state.storage.db().create_vessel(&vessel).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Create,
        format!("vessel {}", vessel.name),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(vessel)))
}

async fn update_vessel(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateVesselRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::Vessels) {
        return Ok(denied);
    }

    let Some(mut vessel) = state.storage.db().find_vessel(*path).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Vessel not found".to_string())));
    };

    let request = request.into_inner();
    if let Some(name) = request.name {
        vessel.name = name;
    }
    if let Some(owner) = request.owner {
        vessel.owner = owner;
    }
    if let Some(vessel_type) = request.vessel_type {
        vessel.vessel_type = vessel_type;
    }
    if let Some(status) = request.status {
        vessel.status = status;
    }
    if let Some(arrived_on) = request.arrived_on {
        vessel.arrived_on = Some(arrived_on);
    }
    if let Some(departed_on) = request.departed_on {
        vessel.departed_on = Some(departed_on);
    }
    vessel.metadata.touch();

    let vessel = state.storage.db().update_vessel(&vessel).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Update,
        format!("vessel {}", vessel.name),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(vessel)))
}

async fn delete_vessel(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::Vessels) {
        return Ok(denied);
    }

    let Some(vessel) = state.storage.db().find_vessel(*path).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Vessel not found".to_string())));
    };

    let orders = state.storage.db().list_work_orders(Some(vessel.id())).await?;
    if !orders.is_empty() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(
            "Vessel has work orders and cannot be deleted".to_string(),
        )));
    }

    state.storage.db().delete_vessel(vessel.id()).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Delete,
        format!("vessel {}", vessel.name),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Vessel deleted")))
}
