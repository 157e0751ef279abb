use super::common::{bearer_token, map_service_error, parse_batch_uuid, success_response};
use crate::{
    errors::ApiError,
    services::batch_reports::{BatchCostReport, BatchSummaryReport},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::Utc;
use tracing::info;

/// Routes for batch reports
pub fn batch_report_routes() -> Router<AppState> {
    Router::new()
        .route("/batches/:batch_uuid/summary", get(get_batch_summary))
        .route("/batches/:batch_uuid/cost-report", get(get_batch_cost_report))
}

#[utoipa::path(
    get,
    path = "/api/v1/batches/{batch_uuid}/summary",
    summary = "Batch summary",
    description = "Current state, key measurements, vessel durations and volume loss of a batch",
    params(("batch_uuid" = String, Path, description = "Batch UUID")),
    responses(
        (status = 200, description = "Summary generated", body = BatchSummaryReport,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid batch id", body = crate::errors::ErrorResponse),
        (status = 404, description = "Batch not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "Batch Reports"
)]
pub async fn get_batch_summary(
    State(state): State<AppState>,
    Path(batch_uuid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let batch_uuid = parse_batch_uuid(&batch_uuid)?;
    let now = Utc::now();

    let report = state
        .batch_reports
        .batch_summary(batch_uuid, now)
        .await
        .map_err(map_service_error)?;

    info!(%batch_uuid, "served batch summary");
    Ok(success_response(report))
}

#[utoipa::path(
    get,
    path = "/api/v1/batches/{batch_uuid}/cost-report",
    summary = "Batch cost report",
    description = "Attributes ingredient addition costs to purchase order pricing",
    params(("batch_uuid" = String, Path, description = "Batch UUID")),
    responses(
        (status = 200, description = "Cost report generated", body = BatchCostReport,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid batch id", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Batch not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "Batch Reports"
)]
pub async fn get_batch_cost_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(batch_uuid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)?;
    let batch_uuid = parse_batch_uuid(&batch_uuid)?;
    let now = Utc::now();

    let report = state
        .batch_reports
        .batch_cost_report(&token, batch_uuid, now)
        .await
        .map_err(map_service_error)?;

    info!(%batch_uuid, complete = report.cost_complete, "served batch cost report");
    Ok(success_response(report))
}
