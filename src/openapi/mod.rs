use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::services::batch_reports::{
    BatchCostReport, BatchSummaryReport, BrewSessionSummary, CostLineItem, CostSource,
    CurrentVessel, UncostedAddition,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BrewOps API",
        version = "0.2.1",
        description = r#"
# BrewOps batch reports

Read-only reports derived from a production batch's records:

- **Batch summary**: current phase and vessel, OG/FG/ABV/IBU, vessel residence
  durations and transfer loss.
- **Batch cost report**: ingredient additions costed against purchase order pricing.

The cost report forwards the caller's `Authorization: Bearer` credential to the
inventory and procurement services.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Batch Reports", description = "Batch summary and cost reports")
    ),
    paths(
        crate::handlers::batch_reports::get_batch_summary,
        crate::handlers::batch_reports::get_batch_cost_report,
    ),
    components(
        schemas(
            BatchSummaryReport,
            BrewSessionSummary,
            CurrentVessel,
            BatchCostReport,
            CostLineItem,
            CostSource,
            UncostedAddition,
            crate::errors::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDocV1;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Serves the generated document at `/api-docs/openapi.json`
pub fn openapi_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDocV1::openapi()) }),
    )
}
