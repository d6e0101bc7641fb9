pub mod table_selection;

pub use table_selection::TableSelection;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Approval status gating whether a connector can back new endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorStatus {
    Init,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticType {
    Uuid,
    Id,
    Email,
    Url,
    Currency,
    Date,
    Datetime,
    Timestamp,
    Time,
    Status,
    Category,
    Text,
    Number,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_type: Option<SemanticType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_foreign_key: Option<bool>,
}

/// Table shape as discovered by the connection test. Read-only within the
/// wizards; selection state is tracked separately in [`TableSelection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub columns: Vec<ColumnMetadata>,
}

/// Connection details, keyed by connector type. Each variant carries only
/// the fields that type understands, so a DATABASE config can never be
/// probed for an API key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConnectorConfig {
    #[serde(rename = "DATABASE", rename_all = "camelCase")]
    Database {
        host: String,
        port: u16,
        username: String,
        password: String,
        database_name: String,
        #[serde(default = "default_schema")]
        schema: String,
    },
    #[serde(rename = "API", rename_all = "camelCase")]
    Api {
        endpoint: String,
        auth_type: ApiAuthType,
        #[serde(skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
    },
    #[serde(rename = "FILE_SYSTEM", rename_all = "camelCase")]
    FileSystem { path: String },
}

fn default_schema() -> String {
    "public".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiAuthType {
    None,
    Basic,
    Bearer,
    ApiKey,
}

impl ConnectorConfig {
    pub fn type_name(&self) -> &'static str {
        match self {
            ConnectorConfig::Database { .. } => "DATABASE",
            ConnectorConfig::Api { .. } => "API",
            ConnectorConfig::FileSystem { .. } => "FILE_SYSTEM",
        }
    }
}

/// A registered external data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: String,
    pub name: String,
    pub status: ConnectorStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ConnectorConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registered_tables: Vec<TableMetadata>,
}

/// In-progress connector registration. Created when step 1 opens, mutated
/// by steps 1 and 2, immutable after submit; edits start a new draft
/// seeded from the stored connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorDraft {
    pub name: String,
    pub config: ConnectorConfig,
    #[serde(default)]
    pub registered_tables: Vec<TableMetadata>,
}

impl ConnectorDraft {
    pub fn new(name: impl Into<String>, config: ConnectorConfig) -> Self {
        Self { name: name.into(), config, registered_tables: Vec::new() }
    }

    /// Attach the picker's current selection as the registered snapshot.
    pub fn with_tables(mut self, selection: &TableSelection) -> Self {
        self.registered_tables = selection.selected_tables().into_iter().cloned().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn connector_config_is_a_tagged_union() {
        let config = ConnectorConfig::Database {
            host: "db.internal".to_string(),
            port: 5432,
            username: "reader".to_string(),
            password: "secret".to_string(),
            database_name: "warehouse".to_string(),
            schema: "public".to_string(),
        };

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "DATABASE");
        assert_eq!(value["databaseName"], "warehouse");
    }

    #[test]
    fn api_config_defaults_are_optional_on_the_wire() {
        let config: ConnectorConfig = serde_json::from_value(json!({
            "type": "API",
            "endpoint": "https://api.example.com/v2",
            "authType": "BEARER"
        }))
        .unwrap();

        assert_eq!(config.type_name(), "API");
        match config {
            ConnectorConfig::Api { api_key, .. } => assert!(api_key.is_none()),
            other => panic!("expected API config, got {other:?}"),
        }
    }

    #[test]
    fn database_schema_defaults_to_public() {
        let config: ConnectorConfig = serde_json::from_value(json!({
            "type": "DATABASE",
            "host": "db",
            "port": 5432,
            "username": "u",
            "password": "p",
            "databaseName": "d"
        }))
        .unwrap();

        match config {
            ConnectorConfig::Database { schema, .. } => assert_eq!(schema, "public"),
            other => panic!("expected DATABASE config, got {other:?}"),
        }
    }

    #[test]
    fn draft_snapshots_the_picked_tables() {
        let table = TableMetadata {
            name: "users".to_string(),
            display_name: None,
            columns: vec![],
        };
        let mut selection = TableSelection::new(vec![table]);
        selection.toggle("users");

        let draft = ConnectorDraft::new(
            "warehouse",
            ConnectorConfig::FileSystem { path: "/srv/exports".to_string() },
        )
        .with_tables(&selection);

        assert_eq!(draft.registered_tables.len(), 1);
        assert_eq!(draft.registered_tables[0].name, "users");
    }

    #[test]
    fn connector_status_uses_wire_casing() {
        assert_eq!(
            serde_json::to_value(ConnectorStatus::Approved).unwrap(),
            json!("APPROVED")
        );
    }
}
