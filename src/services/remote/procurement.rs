use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{build_http_client, endpoint, send_json, PurchaseOrderLineSource, RemoteError};
use crate::config::MAX_PO_LINE_LOOKUP_CHUNK;
use crate::models::PurchaseOrderLineCost;

const SERVICE: &str = "procurement";

#[derive(Serialize)]
struct BatchLookupRequest<'a> {
    uuids: &'a [Uuid],
}

/// HTTP client for the procurement service's purchase order line lookup.
///
/// The lookup endpoint accepts a bounded number of ids, so larger sets are
/// split into sequential requests.
#[derive(Debug, Clone)]
pub struct ProcurementClient {
    http: Client,
    base_url: String,
    chunk_size: usize,
}

impl ProcurementClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        chunk_size: usize,
    ) -> Result<Self, RemoteError> {
        let http = build_http_client(timeout).map_err(|e| RemoteError::ClientBuild {
            service: SERVICE,
            message: e.to_string(),
        })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            chunk_size: chunk_size.clamp(1, MAX_PO_LINE_LOOKUP_CHUNK),
        })
    }
}

#[async_trait]
impl PurchaseOrderLineSource for ProcurementClient {
    #[instrument(skip(self, auth_token, uuids), fields(count = uuids.len()))]
    async fn lookup_purchase_order_lines(
        &self,
        auth_token: &str,
        uuids: &[Uuid],
    ) -> Result<Vec<PurchaseOrderLineCost>, RemoteError> {
        let url = endpoint(&self.base_url, "purchase-order-lines/batch-lookup");
        let mut lines = Vec::with_capacity(uuids.len());

        for chunk in uuids.chunks(self.chunk_size) {
            let request = self
                .http
                .post(&url)
                .bearer_auth(auth_token)
                .json(&BatchLookupRequest { uuids: chunk });

            let mut page: Vec<PurchaseOrderLineCost> = send_json(SERVICE, request).await?;
            debug!(requested = chunk.len(), returned = page.len(), "purchase order line lookup");
            lines.append(&mut page);
        }

        Ok(lines)
    }
}
