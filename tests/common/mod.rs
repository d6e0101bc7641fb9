// In-memory collaborator fakes shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use datagate_console::clients::{
    ClientError, ConnectorDirectory, CreateEndpointRequest, DataEndpoint, EndpointRepository,
    QueryExecutor, TestQueryRequest, TestQueryResponse,
};
use datagate_console::connector::{
    ColumnMetadata, Connector, ConnectorStatus, SemanticType, TableMetadata,
};

pub fn users_table() -> TableMetadata {
    TableMetadata {
        name: "users".to_string(),
        display_name: Some("Users".to_string()),
        columns: vec![
            ColumnMetadata {
                name: "id".to_string(),
                data_type: "bigint".to_string(),
                semantic_type: Some(SemanticType::Id),
                is_primary_key: Some(true),
                is_foreign_key: None,
            },
            ColumnMetadata {
                name: "email".to_string(),
                data_type: "varchar".to_string(),
                semantic_type: Some(SemanticType::Email),
                is_primary_key: None,
                is_foreign_key: None,
            },
            ColumnMetadata {
                name: "ssn".to_string(),
                data_type: "varchar".to_string(),
                semantic_type: None,
                is_primary_key: None,
                is_foreign_key: None,
            },
        ],
    }
}

pub fn orders_table() -> TableMetadata {
    TableMetadata {
        name: "orders".to_string(),
        display_name: None,
        columns: vec![ColumnMetadata {
            name: "id".to_string(),
            data_type: "bigint".to_string(),
            semantic_type: Some(SemanticType::Id),
            is_primary_key: Some(true),
            is_foreign_key: None,
        }],
    }
}

pub fn connector(id: &str, name: &str, status: ConnectorStatus, tables: Vec<TableMetadata>) -> Connector {
    Connector {
        id: id.to_string(),
        name: name.to_string(),
        status,
        created_at: Utc::now(),
        config: None,
        registered_tables: tables,
    }
}

/// Directory fake backed by a fixed connector list. Mirrors the backend by
/// filtering to APPROVED in `list_approved`.
pub struct StaticDirectory {
    pub connectors: Vec<Connector>,
}

impl StaticDirectory {
    pub fn with_defaults() -> Self {
        Self {
            connectors: vec![
                connector("c1", "Warehouse", ConnectorStatus::Approved, vec![users_table(), orders_table()]),
                connector("c2", "Billing API", ConnectorStatus::Approved, vec![orders_table()]),
                connector("c3", "Scratch", ConnectorStatus::Init, vec![]),
            ],
        }
    }
}

#[async_trait]
impl ConnectorDirectory for StaticDirectory {
    async fn list_approved(&self) -> Result<Vec<Connector>, ClientError> {
        Ok(self
            .connectors
            .iter()
            .filter(|c| c.status == ConnectorStatus::Approved)
            .cloned()
            .collect())
    }

    async fn registered_tables(
        &self,
        connector_id: &str,
    ) -> Result<Vec<TableMetadata>, ClientError> {
        self.connectors
            .iter()
            .find(|c| c.id == connector_id)
            .map(|c| c.registered_tables.clone())
            .ok_or_else(|| ClientError::Network(format!("unknown connector '{connector_id}'")))
    }
}

/// Executor fake returning canned rows, or a fixed execution failure.
pub struct StaticExecutor {
    pub response: TestQueryResponse,
    pub fail_with: Option<String>,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<TestQueryRequest>>,
}

impl StaticExecutor {
    pub fn with_user_rows() -> Self {
        Self {
            response: TestQueryResponse {
                columns: vec!["id".to_string(), "email".to_string()],
                rows: vec![
                    HashMap::from([
                        ("id".to_string(), json!(1)),
                        ("email".to_string(), json!("john.doe@example.com")),
                    ]),
                    HashMap::from([
                        ("id".to_string(), json!(2)),
                        ("email".to_string(), json!("mk@example.com")),
                    ]),
                ],
                row_count: 2,
                generated_sql: Some("SELECT id, email FROM users LIMIT 10".to_string()),
            },
            fail_with: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        let mut executor = Self::with_user_rows();
        executor.fail_with = Some(message.to_string());
        executor
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryExecutor for StaticExecutor {
    async fn test(&self, request: TestQueryRequest) -> Result<TestQueryResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        match &self.fail_with {
            Some(message) => Err(ClientError::Execution(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}

/// Executor whose first call never resolves; later calls answer normally.
/// Used to exercise abandoned in-flight requests.
pub struct StallingExecutor {
    inner: StaticExecutor,
    stall_first: AtomicBool,
}

impl StallingExecutor {
    pub fn new() -> Self {
        Self { inner: StaticExecutor::with_user_rows(), stall_first: AtomicBool::new(true) }
    }
}

#[async_trait]
impl QueryExecutor for StallingExecutor {
    async fn test(&self, request: TestQueryRequest) -> Result<TestQueryResponse, ClientError> {
        if self.stall_first.swap(false, Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.inner.test(request).await
    }
}

/// Repository fake that records create calls and echoes the saved endpoint
/// back the way the backend does, including the derived path alias.
pub struct RecordingRepository {
    pub created: Mutex<Vec<CreateEndpointRequest>>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self { created: Mutex::new(Vec::new()) }
    }

    pub fn create_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn last_request_json(&self) -> Option<Value> {
        self.created
            .lock()
            .unwrap()
            .last()
            .map(|r| serde_json::to_value(r).expect("serializable request"))
    }
}

#[async_trait]
impl EndpointRepository for RecordingRepository {
    async fn create(&self, request: CreateEndpointRequest) -> Result<DataEndpoint, ClientError> {
        let path_alias = request.name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("_");
        let endpoint = DataEndpoint {
            id: format!("ep-{}", self.create_count() + 1),
            name: request.name.clone(),
            description: request.description.clone(),
            connector_id: request.connector_id.clone(),
            path_alias,
            query_config: request.query_config.clone(),
            masking_config: request.masking_config.clone(),
            created_at: Utc::now(),
        };
        self.created.lock().unwrap().push(request);
        Ok(endpoint)
    }
}
