//! Service Order Report
//!
//! HTTP service that turns company service orders into a paginated PDF.
//!
//! # Modules
//!
//! - `report`: pagination of companies into row chunks, headers and footers
//! - `pdf`: `printpdf` rendering and font handling
//! - `routes`: axum handlers

pub mod config;
pub mod error;
pub mod pdf;
pub mod report;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/v1/health", get(routes::health::health_check))
        .nest("/api/v1/report", routes::report::router())
        .nest("/api/report", routes::report::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
