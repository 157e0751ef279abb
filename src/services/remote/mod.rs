//! Clients for the sibling inventory and procurement services.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::{IngredientLot, PurchaseOrderLineCost};

pub mod inventory;
pub mod procurement;

pub use inventory::InventoryClient;
pub use procurement::ProcurementClient;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{service}: request timed out")]
    Timeout { service: &'static str },

    #[error("{service}: network error: {source}")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service}: unexpected status {status}")]
    Status {
        service: &'static str,
        status: StatusCode,
    },

    #[error("{service}: failed to decode response: {source}")]
    Parse {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service}: failed to build http client: {message}")]
    ClientBuild {
        service: &'static str,
        message: String,
    },
}

impl RemoteError {
    pub fn service(&self) -> &'static str {
        match self {
            RemoteError::Timeout { service }
            | RemoteError::Network { service, .. }
            | RemoteError::Status { service, .. }
            | RemoteError::Parse { service, .. }
            | RemoteError::ClientBuild { service, .. } => service,
        }
    }

    fn transport(service: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            RemoteError::Timeout { service }
        } else {
            RemoteError::Network { service, source }
        }
    }
}

impl From<RemoteError> for ServiceError {
    fn from(err: RemoteError) -> Self {
        ServiceError::ExternalServiceError(err.to_string())
    }
}

/// Ingredient lots consumed by a batch.
#[async_trait]
pub trait InventoryLotSource: Send + Sync {
    async fn batch_ingredient_lots(
        &self,
        auth_token: &str,
        batch_uuid: Uuid,
    ) -> Result<Vec<IngredientLot>, RemoteError>;
}

/// Pricing for a set of purchase order lines.
#[async_trait]
pub trait PurchaseOrderLineSource: Send + Sync {
    async fn lookup_purchase_order_lines(
        &self,
        auth_token: &str,
        uuids: &[Uuid],
    ) -> Result<Vec<PurchaseOrderLineCost>, RemoteError>;
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("brewops-api/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Joins a configured base url and a path without doubling slashes.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Sends a prepared request and decodes a JSON body, mapping every failure
/// onto `RemoteError` for `service`.
pub(crate) async fn send_json<T>(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, RemoteError>
where
    T: serde::de::DeserializeOwned,
{
    let response = request
        .send()
        .await
        .map_err(|e| RemoteError::transport(service, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status { service, status });
    }

    response.json::<T>().await.map_err(|source| {
        if source.is_timeout() {
            RemoteError::Timeout { service }
        } else {
            RemoteError::Parse { service, source }
        }
    })
}
