use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::repositories::BatchStore;
use crate::services::remote::{InventoryLotSource, PurchaseOrderLineSource, RemoteError};

use super::costing::{attribute_costs, purchase_order_line_ids, BatchCostReport};
use super::summary::{assemble_summary, BatchSummaryReport};
use super::volumes::volume_metrics;

const SUMMARY_REPORT: &str = "summary";
const COST_REPORT: &str = "cost";

/// Builds batch summary and cost reports from the batch store and the
/// inventory and procurement services.
#[derive(Clone)]
pub struct BatchReportService {
    store: Arc<dyn BatchStore>,
    inventory: Arc<dyn InventoryLotSource>,
    procurement: Arc<dyn PurchaseOrderLineSource>,
}

fn batch_not_found(batch_uuid: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Batch with ID {} not found", batch_uuid))
}

fn store_failure(err: ServiceError) -> ServiceError {
    error!(collaborator = "batch_store", error = %err, "batch store read failed");
    counter!("brewops.reports.upstream_failures", 1, "collaborator" => "batch_store");
    err
}

fn remote_failure(err: RemoteError) -> ServiceError {
    error!(collaborator = err.service(), error = %err, "remote lookup failed");
    counter!("brewops.reports.upstream_failures", 1, "collaborator" => err.service());
    err.into()
}

fn record_build(kind: &'static str, started: Instant) {
    counter!("brewops.reports.generated", 1, "report" => kind);
    histogram!(
        "brewops.reports.build_seconds",
        started.elapsed().as_secs_f64(),
        "report" => kind
    );
}

impl BatchReportService {
    pub fn new(
        store: Arc<dyn BatchStore>,
        inventory: Arc<dyn InventoryLotSource>,
        procurement: Arc<dyn PurchaseOrderLineSource>,
    ) -> Self {
        Self {
            store,
            inventory,
            procurement,
        }
    }

    /// Summary of a batch as of `now`.
    #[instrument(skip(self), fields(batch_uuid = %batch_uuid))]
    pub async fn batch_summary(
        &self,
        batch_uuid: Uuid,
        now: DateTime<Utc>,
    ) -> Result<BatchSummaryReport, ServiceError> {
        let started = Instant::now();

        let raw = self
            .store
            .get_batch_summary_raw(batch_uuid)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| batch_not_found(batch_uuid))?;

        let report = assemble_summary(&raw, now);
        record_build(SUMMARY_REPORT, started);
        info!("batch summary generated");
        Ok(report)
    }

    /// Cost attribution for every ingredient addition of a batch.
    ///
    /// `auth_token` is forwarded unchanged to the inventory and procurement
    /// services.
    #[instrument(skip(self, auth_token), fields(batch_uuid = %batch_uuid))]
    pub async fn batch_cost_report(
        &self,
        auth_token: &str,
        batch_uuid: Uuid,
        now: DateTime<Utc>,
    ) -> Result<BatchCostReport, ServiceError> {
        let started = Instant::now();

        let raw = self
            .store
            .get_batch_summary_raw(batch_uuid)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| batch_not_found(batch_uuid))?;

        let additions = self
            .store
            .list_additions_for_summary(&raw)
            .await
            .map_err(store_failure)?;

        let starting_volume_bbl =
            volume_metrics(&raw.batch_volumes, &raw.occupancies, &raw.transfers)
                .starting_volume_bbl;

        if additions.is_empty() {
            record_build(COST_REPORT, started);
            info!("batch has no additions");
            return Ok(BatchCostReport::without_additions(
                batch_uuid,
                starting_volume_bbl,
                now,
            ));
        }

        let lots = self
            .inventory
            .batch_ingredient_lots(auth_token, batch_uuid)
            .await
            .map_err(remote_failure)?;

        let po_line_ids = purchase_order_line_ids(&lots);
        let po_lines = if po_line_ids.is_empty() {
            Vec::new()
        } else {
            self.procurement
                .lookup_purchase_order_lines(auth_token, &po_line_ids)
                .await
                .map_err(remote_failure)?
        };

        let report = attribute_costs(
            batch_uuid,
            &additions,
            &lots,
            &po_lines,
            starting_volume_bbl,
            now,
        );

        record_build(COST_REPORT, started);
        info!(
            line_items = report.line_items.len(),
            uncosted = report.uncosted_line_count,
            complete = report.cost_complete,
            "batch cost report generated"
        );
        Ok(report)
    }
}
