//! BrewOps API library
//!
//! Batch summary and cost reports over brewery production records.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{middleware, Router};
use std::sync::Arc;

use crate::db::DbPool;
use crate::services::batch_reports::BatchReportService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: Arc<config::AppConfig>,
    pub batch_reports: Arc<BatchReportService>,
}

/// Versioned API routes, nested under `/api/v1`
pub fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(handlers::batch_reports::batch_report_routes())
}

/// Full application router with request id, tracing and access log layers.
pub fn build_router(state: AppState, access_log: Arc<logging::LoggingState>) -> Router {
    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::openapi_routes())
        .layer(middleware::from_fn_with_state(
            access_log,
            logging::logging_middleware,
        ))
        .layer(crate::tracing::configure_http_tracing())
        .layer(middleware::from_fn(crate::tracing::request_id_middleware))
        .with_state(state)
}
