//! Identity-resolution middleware
//!
//! Resolves the bearer token into an `Identity` request extension before the
//! handler runs. Resolution failure is not an error here: the request
//! proceeds without an identity and every policy check downstream denies.

use crate::auth::Identity;
use crate::server::AppState;
use crate::server::middleware::{extract_bearer_token, is_public_route};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;

/// Identity middleware for Actix-web
pub struct IdentityMiddleware;

impl<S, B> Transform<S, ServiceRequest> for IdentityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = IdentityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for identity middleware
pub struct IdentityMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if is_public_route(req.path()) {
            return Box::pin(async move { service.call(req).await });
        }

        let token = extract_bearer_token(req.headers());
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            if let (Some(state), Some(token)) = (&app_state, &token) {
                match state.auth.resolve_identity(token).await {
                    Some(identity) => {
                        req.extensions_mut().insert::<Identity>(identity);
                    }
                    None => {
                        debug!("Request carries no resolvable identity: {}", req.path());
                    }
                }
            }

            service.call(req).await
        })
    }
}
