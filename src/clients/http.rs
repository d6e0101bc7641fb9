use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::connector::{Connector, ConnectorStatus, TableMetadata};

use super::error::ClientError;
use super::{
    ConnectorDirectory, CreateEndpointRequest, DataEndpoint, EndpointRepository, QueryExecutor,
    TestQueryRequest, TestQueryResponse,
};

/// HTTP implementation of the collaborator contracts against the console
/// backend's REST API. The tenant id is explicit constructor input and is
/// sent as `X-Tenant-ID` on every request; the core stays tenant-agnostic.
pub struct HttpApi {
    base_url: Url,
    tenant_id: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: &str, tenant_id: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Network(format!("invalid base url '{base_url}': {e}")))?;
        let timeout = std::time::Duration::from_secs(crate::config::config().api.request_timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self { base_url, tenant_id: tenant_id.into(), client })
    }

    pub fn from_config() -> Result<Self, ClientError> {
        let config = crate::config::config();
        Self::new(&config.api.base_url, config.api.default_tenant.clone())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Network(format!("invalid path '{path}': {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .header("X-Tenant-ID", &self.tenant_id)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        execution: bool,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .header("X-Tenant-ID", &self.tenant_id)
            .json(body)
            .send()
            .await?;

        if execution && response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            let message = Self::error_message(response).await;
            return Err(ClientError::Execution(message));
        }
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(if status.is_server_error() {
                ClientError::Execution(message)
            } else {
                ClientError::Network(message)
            });
        }
        response.json::<T>().await.map_err(|e| ClientError::Decode(e.to_string()))
    }

    // Pull the backend's reported message out of its error envelope; fall
    // back to the raw body.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("HTTP {status}: {body}"))
    }
}

// Per-connector route; an unknown id gets the backend's 404 instead of a
// message synthesized from a full-list scan.
fn tables_path(connector_id: &str) -> String {
    format!("/api/v1/connectors/{connector_id}/tables")
}

#[async_trait]
impl ConnectorDirectory for HttpApi {
    async fn list_approved(&self) -> Result<Vec<Connector>, ClientError> {
        let connectors: Vec<Connector> = self.get_json("/api/v1/connectors").await?;
        Ok(connectors
            .into_iter()
            .filter(|c| c.status == ConnectorStatus::Approved)
            .collect())
    }

    async fn registered_tables(
        &self,
        connector_id: &str,
    ) -> Result<Vec<TableMetadata>, ClientError> {
        let tables: Vec<TableMetadata> = self.get_json(&tables_path(connector_id)).await?;
        if tables.is_empty() {
            tracing::warn!(connector_id, "connector has no registered tables");
        }
        Ok(tables)
    }
}

#[async_trait]
impl QueryExecutor for HttpApi {
    async fn test(&self, request: TestQueryRequest) -> Result<TestQueryResponse, ClientError> {
        self.post_json("/api/v1/data-endpoints/test", &request, true).await
    }
}

#[async_trait]
impl EndpointRepository for HttpApi {
    async fn create(&self, request: CreateEndpointRequest) -> Result<DataEndpoint, ClientError> {
        self.post_json("/api/v1/data-endpoints", &request, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_route_is_per_connector() {
        let api = HttpApi::new("http://localhost:8080", "tenant").unwrap();
        let url = api.endpoint(&tables_path("c1")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/connectors/c1/tables");
    }
}
