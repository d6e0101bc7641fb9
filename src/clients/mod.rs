pub mod error;
pub mod http;

pub use error::ClientError;
pub use http::HttpApi;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::connector::{Connector, TableMetadata};
use crate::masking::ColumnMaskingConfig;
use crate::query::QueryConfig;

/// Test/preview request: run the config against the connector, capped to
/// `limit` rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQueryRequest {
    pub connector_id: String,
    pub query_config: QueryConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQueryResponse {
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, Value>>,
    pub row_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_sql: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEndpointRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub connector_id: String,
    pub query_config: QueryConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masking_config: Option<ColumnMaskingConfig>,
}

/// A saved read-only endpoint as reported back by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEndpoint {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub connector_id: String,
    /// Server-derived stable route segment (lowercased, spaces -> `_`).
    pub path_alias: String,
    pub query_config: QueryConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masking_config: Option<ColumnMaskingConfig>,
    pub created_at: DateTime<Utc>,
}

/// Supplies the wizard's selectable connectors and their registered table
/// snapshots. Only APPROVED connectors are offered.
#[async_trait]
pub trait ConnectorDirectory: Send + Sync {
    async fn list_approved(&self) -> Result<Vec<Connector>, ClientError>;

    /// Tables registered at connector-creation time; never a live schema
    /// probe.
    async fn registered_tables(&self, connector_id: &str)
        -> Result<Vec<TableMetadata>, ClientError>;
}

/// Runs a [`QueryConfig`] remotely for preview and final test.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn test(&self, request: TestQueryRequest) -> Result<TestQueryResponse, ClientError>;
}

/// Persists completed endpoint drafts. The only state-mutating collaborator
/// the wizard talks to.
#[async_trait]
pub trait EndpointRepository: Send + Sync {
    async fn create(&self, request: CreateEndpointRequest) -> Result<DataEndpoint, ClientError>;
}
