//! # API REST
//!
//! Reference REST server for RxDesk.
//!
//! Handles:
//! - HTTP endpoints with axum (accounts, prescriptions, day-wise report)
//! - Bearer token authentication and request validation
//! - OpenAPI documentation served as JSON
//!
//! Storage is in memory and lost on restart. Uses `api-shared` for the wire types.

#![warn(rust_2018_idioms)]

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use routes::{router, ApiDoc};
pub use state::AppState;

/// Binds `cfg.addr` and serves until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(cfg: ServerConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&cfg.addr).await?;
    tracing::info!("-- Starting RxDesk REST API on {}", listener.local_addr()?);

    let app = router(AppState::new(&cfg));
    axum::serve(listener, app).await?;
    Ok(())
}
