//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::middleware::IdentityMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::sync::Arc;
use tracing::{info, warn};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = crate::storage::StorageLayer::new(&config.storage).await?;
        let auth = crate::auth::AuthSystem::new(&config.auth, Arc::new(storage.clone())).await?;
        let state = AppState::new(config.clone(), auth, storage);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors_config = &state.config.server.cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                cors = cors.allow_any_origin();
                cors_config.validate().unwrap_or_else(|e| {
                    warn!(error = %e, "CORS configuration warning");
                });
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }

            cors = cors
                .allow_any_method()
                .allow_any_header()
                .max_age(cors_config.max_age as usize);

            if cors_config.allow_credentials {
                cors = cors.supports_credentials();
            }
        }

        App::new()
            .app_data(state)
            .wrap(IdentityMiddleware)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "Drydock")))
            .configure(routes::health::configure_routes)
            .service(
                web::scope("/api")
                    .configure(routes::auth::configure_routes)
                    .configure(routes::dashboard::configure_routes)
                    .configure(routes::vessels::configure_routes)
                    .configure(routes::work_orders::configure_routes)
                    .configure(routes::details::configure_routes)
                    .configure(routes::bastp::configure_routes)
                    .configure(routes::invoices::configure_routes)
                    .configure(routes::users::configure_routes)
                    .configure(routes::settings::configure_routes)
                    .configure(routes::reports::configure_routes)
                    .configure(routes::activity::configure_routes),
            )
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let workers = self.config.workers;
        let state = web::Data::new(self.state);

        let mut server =
            ActixHttpServer::new(move || Self::create_app(state.clone())).bind(&bind_addr)?;
        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        info!("HTTP server listening on {}", bind_addr);
        server.run().await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
