//! Supplier Portal API Library
//!
//! CRUD service over the supply chain inventory graph: suppliers, the
//! products they supply, and the stores where those products are stocked.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod health;
pub mod openapi;
pub mod queries;
pub mod services;
pub mod tracing;

use axum::{response::Redirect, routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

pub use handlers::AppServices;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// All browse routes mounted under `/suppliers`
pub fn supplier_portal_routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::suppliers::suppliers_routes())
        .merge(handlers::products::products_routes())
        .merge(handlers::stores::stores_routes())
        .merge(handlers::links::links_routes())
        .merge(handlers::dashboard::dashboard_routes())
}

/// Build the full application: routes, health endpoints, Swagger UI and
/// the standard middleware stack. CORS is layered on by the binary since
/// it depends on deployment configuration.
pub fn app(state: AppState) -> Router {
    let db = state.db.clone();

    Router::new()
        .route("/", get(|| async { Redirect::temporary("/suppliers/") }))
        .nest("/suppliers", supplier_portal_routes())
        .merge(openapi::swagger_ui())
        .with_state(state)
        .nest("/health", health::health_routes(db))
        // HTTP tracing layer for consistent request/response telemetry
        .layer(tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(tracing::request_id_middleware))
}
