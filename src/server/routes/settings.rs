//! System settings endpoints

use crate::auth::Feature;
use crate::core::models::{ActivityAction, SystemSettings};
use crate::server::AppState;
use crate::server::routes::{
    ApiResponse, current_identity, mutation_denied, record_activity, view_denied,
};
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};

/// Configure settings routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("", web::get().to(get_settings))
            .route("", web::put().to(put_settings)),
    );
}

async fn get_settings(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::SystemSettings) {
        return Ok(denied);
    }

    let settings = state.storage.db().load_settings().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(settings)))
}

async fn put_settings(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<SystemSettings>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::SystemSettings)
    {
        return Ok(denied);
    }

    if request.shipyard_name.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("Shipyard name is required".to_string())));
    }

    let settings = state.storage.db().store_settings(&request).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Update,
        "system settings".to_string(),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(settings)))
}
