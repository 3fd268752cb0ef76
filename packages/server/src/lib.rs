#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the energy map application.
//!
//! Serves summaries, filter options, insights, and map markers computed
//! from the renewable energy project dataset. The dataset is fetched once
//! by a shared [`DatasetIngestor`]; every handler reads the same cached
//! collection.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use energy_map_analytics_models::DEFAULT_MARKER_CAP;
use energy_map_ingest::DatasetIngestor;
use energy_map_ingest::config::IngestConfig;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Loads the dataset once and serves the cached collection.
    pub ingestor: Arc<DatasetIngestor>,
    /// Marker cap used when a request does not give one.
    pub marker_cap: usize,
}

impl AppState {
    /// Creates state around an ingestor with the default marker cap.
    #[must_use]
    pub const fn new(ingestor: Arc<DatasetIngestor>) -> Self {
        Self {
            ingestor,
            marker_cap: DEFAULT_MARKER_CAP,
        }
    }

    /// Sets the default marker cap.
    #[must_use]
    pub const fn with_marker_cap(mut self, marker_cap: usize) -> Self {
        self.marker_cap = marker_cap;
        self
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/summary", web::get().to(handlers::summary))
            .route("/summary/filtered", web::get().to(handlers::filtered_summary))
            .route("/filters", web::get().to(handlers::filters))
            .route("/insights", web::get().to(handlers::insights))
            .route("/markers", web::get().to(handlers::markers)),
    );
}

/// Reads `MARKER_CAP`, ignoring unparsable or zero values.
fn marker_cap_from_env() -> usize {
    std::env::var("MARKER_CAP")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|cap: &usize| *cap > 0)
        .unwrap_or(DEFAULT_MARKER_CAP)
}

/// Starts the energy map API server.
///
/// Builds the dataset ingestor from the environment, attempts a first load
/// (a failure is logged and retried on the next request), and starts the
/// Actix-Web HTTP server. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = IngestConfig::from_env();
    let ingestor = Arc::new(config.build_ingestor());

    log::info!("Loading dataset...");
    match ingestor.load().await {
        Ok(projects) => log::info!("Dataset ready with {} projects", projects.len()),
        Err(e) => log::warn!("Initial dataset load failed, will retry on request: {e}"),
    }

    let state = web::Data::new(AppState::new(ingestor).with_marker_cap(marker_cap_from_env()));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!(
        "Starting server on {bind_addr}:{port} (marker cap {})",
        state.marker_cap
    );

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
