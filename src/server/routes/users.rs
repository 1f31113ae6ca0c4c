//! User management endpoints
//!
//! Gated behind userManagement, which only MASTER holds.

use crate::auth::Feature;
use crate::core::models::{ActivityAction, Role, UserStatus};
use crate::server::AppState;
use crate::server::routes::auth::UserInfo;
use crate::server::routes::{
    ApiResponse, current_identity, mutation_denied, record_activity, view_denied,
};
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Configure user management routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}

/// User create request
#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    username: String,
    email: String,
    password: String,
    role: Role,
    #[serde(default)]
    display_name: Option<String>,
}

/// User update request; absent fields stay unchanged
#[derive(Debug, Deserialize)]
struct UpdateUserRequest {
    email: Option<String>,
    display_name: Option<String>,
    role: Option<Role>,
    status: Option<UserStatus>,
}

async fn list_users(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::UserManagement) {
        return Ok(denied);
    }

    let users = state.storage.db().list_users().await?;
    let rows: Vec<UserInfo> = users.iter().map(UserInfo::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(rows)))
}

async fn create_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::UserManagement)
    {
        return Ok(denied);
    }

    if let Err(e) = validation::validate_username(&request.username) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())));
    }
    if let Err(e) = validation::validate_email(&request.email) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())));
    }
    if let Err(e) = validation::validate_password(&request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())));
    }

    let request = request.into_inner();
    let mut user = match state
        .auth
        .create_user(request.username, request.email, request.password, request.role)
        .await
    {
        Ok(user) => user,
        Err(DashboardError::Conflict(msg)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(msg)));
        }
        Err(e) => return Err(e),
    };

    if request.display_name.is_some() {
        user.display_name = request.display_name;
        user.metadata.touch();
        user = state.storage.db().update_user(&user).await?;
    }

    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Create,
        format!("user {}", user.username),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(UserInfo::from(&user))))
}

async fn update_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::UserManagement)
    {
        return Ok(denied);
    }

    let Some(mut user) = state.storage.db().find_user_by_id(*path).await? else {
        return Ok(
            HttpResponse::NotFound().json(ApiResponse::<()>::error("User not found".to_string()))
        );
    };

    let request = request.into_inner();
    if let Some(email) = request.email {
        if let Err(e) = validation::validate_email(&email) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())));
        }
        user.email = email;
    }
    if request.display_name.is_some() {
        user.display_name = request.display_name;
    }
    if let Some(role) = request.role {
        user.role = role;
    }
    if let Some(status) = request.status {
        user.status = status;
    }
    user.metadata.touch();

    let user = state.storage.db().update_user(&user).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Update,
        format!("user {}", user.username),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserInfo::from(&user))))
}

async fn delete_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::UserManagement)
    {
        return Ok(denied);
    }

    // Deleting yourself would orphan the session mid-flight
    if let Some(identity) = identity.as_ref() {
        if identity.user_id() == *path {
            return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(
                "Cannot delete the signed-in account".to_string(),
            )));
        }
    }

    let Some(user) = state.storage.db().find_user_by_id(*path).await? else {
        return Ok(
            HttpResponse::NotFound().json(ApiResponse::<()>::error("User not found".to_string()))
        );
    };

    state.storage.db().delete_user(user.id()).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Delete,
        format!("user {}", user.username),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success("User deleted")))
}
