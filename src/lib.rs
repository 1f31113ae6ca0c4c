//! # Drydock
//!
//! Backend service for a shipyard operations dashboard: vessels, work
//! orders, work-detail line items, progress reports with photo evidence,
//! BASTP work-completion certificates and derived invoices.
//!
//! Every screen-facing endpoint is a thin view gate over two composable
//! policy checks: the feature-to-role access matrix governs what an actor
//! may see, and the read-only derivation independently governs whether the
//! actor may mutate within a visible feature.
//!
//! ## Running the service
//!
//! ```rust,no_run
//! use drydock::{Config, Dashboard};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/dashboard.yaml").await?;
//!     let dashboard = Dashboard::new(config).await?;
//!     dashboard.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Checking access directly
//!
//! ```rust
//! use drydock::auth::{AccessPolicy, Feature, RoleSet};
//! use drydock::core::models::Role;
//!
//! let policy = AccessPolicy::new();
//! // No identity resolved yet: everything denies
//! assert!(!policy.can_access_feature(None, Feature::Dashboard));
//! assert!(!policy.has_role(None, &RoleSet::from(Role::Master)));
//! assert!(!policy.is_read_only(None));
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::{AccessMatrix, AccessPolicy, AuthSystem, Feature, Identity, RoleSet};
pub use config::Config;
pub use crate::core::models::Role;
pub use utils::error::{DashboardError, Result};

use tracing::info;

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The dashboard service
pub struct Dashboard {
    config: Config,
    server: server::HttpServer,
}

impl Dashboard {
    /// Create a new dashboard instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new dashboard instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the dashboard server
    pub async fn run(self) -> Result<()> {
        info!("Starting drydock dashboard");
        info!("Listening on {}", self.config.server.address());

        self.server.start().await
    }
}
