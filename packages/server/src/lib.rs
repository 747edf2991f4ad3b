#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the crime severity dashboard.
//!
//! Serves the analysis and detail views as JSON and the district severity
//! map as `GeoJSON`. The dashboard is loaded once and shared read-only
//! across workers.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use crime_index_dashboard::Dashboard;

/// Address bound when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Port bound when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
pub struct AppState {
    /// Loaded tables and scoring setup.
    pub dashboard: Arc<Dashboard>,
}

/// Bind address and port from `BIND_ADDR` and `PORT`, falling back to
/// [`DEFAULT_BIND_ADDR`] and [`DEFAULT_PORT`].
#[must_use]
pub fn bind_from_env() -> (String, u16) {
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    (bind_addr, port)
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/categories", web::get().to(handlers::categories))
            .route("/states", web::get().to(handlers::states))
            .route("/states/{state}/districts", web::get().to(handlers::districts))
            .route("/states/{state}/analysis", web::get().to(handlers::analysis))
            .route("/states/{state}/map", web::get().to(handlers::map))
            .route(
                "/states/{state}/districts/{district}",
                web::get().to(handlers::detail),
            ),
    );
}

/// Starts the API server on `bind_addr:port`.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. `#[actix_web::main]` or `actix_web::rt::System::block_on`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(
    dashboard: Arc<Dashboard>,
    bind_addr: String,
    port: u16,
) -> std::io::Result<()> {
    let state = web::Data::new(AppState { dashboard });

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
