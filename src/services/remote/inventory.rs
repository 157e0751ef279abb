use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{build_http_client, endpoint, send_json, InventoryLotSource, RemoteError};
use crate::models::IngredientLot;

const SERVICE: &str = "inventory";

/// HTTP client for the inventory service's ingredient lot listing.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: Client,
    base_url: String,
}

impl InventoryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let base_url = base_url.into();
        let http = build_http_client(timeout).map_err(|e| RemoteError::ClientBuild {
            service: SERVICE,
            message: e.to_string(),
        })?;
        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl InventoryLotSource for InventoryClient {
    #[instrument(skip(self, auth_token), fields(batch_uuid = %batch_uuid))]
    async fn batch_ingredient_lots(
        &self,
        auth_token: &str,
        batch_uuid: Uuid,
    ) -> Result<Vec<IngredientLot>, RemoteError> {
        let url = endpoint(&self.base_url, "ingredient-lots");
        let request = self
            .http
            .get(url)
            .bearer_auth(auth_token)
            .query(&[("batch_uuid", batch_uuid.to_string())]);

        let lots: Vec<IngredientLot> = send_json(SERVICE, request).await?;
        debug!(count = lots.len(), "fetched ingredient lots");
        Ok(lots)
    }
}
