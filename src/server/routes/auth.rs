//! Authentication endpoints

use crate::auth::Feature;
use crate::core::models::{Role, User, UserStatus};
use crate::server::AppState;
use crate::server::middleware::extract_bearer_token;
use crate::server::routes::{ApiResponse, current_identity};
use crate::utils::error::Result;
use crate::utils::validation;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}

/// User login request
#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

/// Login response
#[derive(Debug, Serialize)]
struct LoginResponse {
    access_token: String,
    token_type: String,
    expires_in: u64,
    user: UserInfo,
}

/// Current-identity response
#[derive(Debug, Serialize)]
struct MeResponse {
    user: UserInfo,
    /// Features the frontend may show, in matrix order
    features: Vec<Feature>,
    /// Whether mutating actions must be disabled
    read_only: bool,
}

/// User info (without sensitive data)
#[derive(Debug, Serialize)]
pub(crate) struct UserInfo {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role,
            status: user.status,
            last_login_at: user.last_login_at,
        }
    }
}

/// Sign-in endpoint
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = validation::validate_username(&request.username) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(e.to_string())));
    }
    if request.password.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("Password is required".to_string())));
    }

    match state.auth.login(&request.username, &request.password).await {
        Ok((user, token)) => {
            let response = LoginResponse {
                access_token: token,
                token_type: "Bearer".to_string(),
                expires_in: state.auth.sessions().expiration(),
                user: UserInfo::from(&user),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
        }
        Err(e) => Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error(e.to_string()))),
    }
}

/// Sign-out endpoint
async fn logout(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let Some(token) = extract_bearer_token(req.headers()) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::<()>::error("Authentication required".to_string())));
    };

    match state.auth.logout(&token).await {
        Ok(()) => {
            info!("Session signed out");
            Ok(HttpResponse::Ok().json(ApiResponse::success("Signed out")))
        }
        Err(e) => Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error(e.to_string()))),
    }
}

/// Current identity, its permitted features, and the read-only flag
async fn me(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let Some(identity) = current_identity(&req) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::<()>::error("Authentication required".to_string())));
    };

    let response = MeResponse {
        user: UserInfo::from(&identity.user),
        features: state.policy.permitted_features(Some(&identity)),
        read_only: state.policy.is_read_only(Some(&identity)),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}
