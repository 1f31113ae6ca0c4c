//! Activity log endpoints

use crate::auth::Feature;
use crate::server::AppState;
use crate::server::routes::{ApiResponse, current_identity, view_denied};
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

/// Configure activity log routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/activity").route("", web::get().to(list_activity)));
}

/// List filter
#[derive(Debug, Deserialize)]
struct ActivityQuery {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    50
}

async fn list_activity(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::ActivityLogs) {
        return Ok(denied);
    }

    let limit = query.limit.clamp(1, 500);
    let entries = state.storage.db().list_activity(limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(entries)))
}
