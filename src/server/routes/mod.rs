//! HTTP route modules
//!
//! Every non-auth route here is a view gate: it resolves the identity the
//! middleware attached, checks the feature through the access policy, and
//! for mutations additionally checks the read-only derivation. The two
//! checks stay independent: matrix membership governs visibility, the
//! read-only flag governs mutation affordances within a visible feature.

pub mod activity;
pub mod auth;
pub mod bastp;
pub mod dashboard;
pub mod details;
pub mod health;
pub mod invoices;
pub mod reports;
pub mod settings;
pub mod users;
pub mod vessels;
pub mod work_orders;

use crate::auth::{AccessPolicy, Feature, Identity};
use crate::core::models::{ActivityAction, ActivityLog};
use crate::server::AppState;
use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use tracing::warn;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// The identity the middleware resolved for this request, if any
pub fn current_identity(req: &HttpRequest) -> Option<Identity> {
    req.extensions().get::<Identity>().cloned()
}

/// Deny a view unless the feature check passes
///
/// 401 when no identity resolved, 403 when resolved but not permitted.
pub(crate) fn view_denied(
    policy: &AccessPolicy,
    identity: Option<&Identity>,
    feature: Feature,
) -> Option<HttpResponse> {
    if policy.can_access_feature(identity, feature) {
        return None;
    }
    Some(match identity {
        None => HttpResponse::Unauthorized()
            .json(ApiResponse::<()>::error("Authentication required".to_string())),
        Some(_) => HttpResponse::Forbidden().json(ApiResponse::<()>::error(format!(
            "Access to {} is not permitted",
            feature
        ))),
    })
}

/// Deny a mutation unless both gates pass
///
/// Layers the read-only check on top of the feature check, never instead
/// of it.
pub(crate) fn mutation_denied(
    policy: &AccessPolicy,
    identity: Option<&Identity>,
    feature: Feature,
) -> Option<HttpResponse> {
    if let Some(denied) = view_denied(policy, identity, feature) {
        return Some(denied);
    }
    if policy.is_read_only(identity) {
        return Some(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "Read-only access: mutating actions are not permitted".to_string(),
        )));
    }
    None
}

/// Append an activity row, logging instead of failing on storage errors
pub(crate) async fn record_activity(
    state: &AppState,
    identity: Option<&Identity>,
    action: ActivityAction,
    detail: String,
) {
    let entry = ActivityLog::new(identity.map(Identity::user_id), action, detail);
    if let Err(e) = state.storage.db().append_activity(&entry).await {
        warn!("Failed to record activity: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success("test data");
        assert!(response.success);
        assert_eq!(response.data, Some("test data"));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_api_response_error() {
        let response = ApiResponse::<()>::error("test error".to_string());
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("test error".to_string()));
    }
}
