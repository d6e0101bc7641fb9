use serde::{Deserialize, Serialize};

use crate::masking::ColumnMaskingConfig;
use crate::query::types::{FilterCondition, SortConfig};

/// Ordered steps of the endpoint creation wizard. On the wire the step is
/// its 1-based number, matching the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    SelectConnector,
    DefineSource,
    BuildQuery,
    Preview,
    Finalize,
}

impl WizardStep {
    /// 1-based position as shown in the step indicator.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::SelectConnector => 1,
            WizardStep::DefineSource => 2,
            WizardStep::BuildQuery => 3,
            WizardStep::Preview => 4,
            WizardStep::Finalize => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WizardStep::SelectConnector),
            2 => Some(WizardStep::DefineSource),
            3 => Some(WizardStep::BuildQuery),
            4 => Some(WizardStep::Preview),
            5 => Some(WizardStep::Finalize),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::SelectConnector => "Select Connector",
            WizardStep::DefineSource => "Define Source",
            WizardStep::BuildQuery => "Build Query",
            WizardStep::Preview => "Preview Data",
            WizardStep::Finalize => "Finalize",
        }
    }
}

impl Serialize for WizardStep {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for WizardStep {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        WizardStep::from_number(n)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid wizard step {n}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "customSQL")]
    CustomSql,
}

/// Transient draft of the endpoint creation flow. Single-owner, never
/// partially persisted; discarded on cancel or successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_step: WizardStep,
    pub selected_connector_id: Option<String>,
    pub source_type: SourceType,
    pub table_name: String,
    pub selected_columns: Vec<String>,
    pub filters: Vec<FilterCondition>,
    pub sort_order: Option<SortConfig>,
    #[serde(rename = "customSQL")]
    pub custom_sql: String,
    pub masking_config: ColumnMaskingConfig,
    pub endpoint_name: String,
    pub description: String,
    /// Entry came from a "create endpoint from this connector" action:
    /// step 1 is not part of the flow and retreat stops at step 2.
    #[serde(default)]
    pub pre_selected: bool,
    /// Bumped whenever the connector, source type, or table changes.
    /// Responses fetched under an older revision are stale and dropped.
    #[serde(default)]
    pub source_revision: u64,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            current_step: WizardStep::SelectConnector,
            selected_connector_id: None,
            source_type: SourceType::Table,
            table_name: String::new(),
            selected_columns: Vec::new(),
            filters: Vec::new(),
            sort_order: None,
            custom_sql: String::new(),
            masking_config: ColumnMaskingConfig::new(),
            endpoint_name: String::new(),
            description: String::new(),
            pre_selected: false,
            source_revision: 0,
        }
    }

    /// Entry point with an externally pre-selected connector. Starts at
    /// step 2 without having passed through step 1's validation.
    pub fn with_connector(connector_id: impl Into<String>) -> Self {
        Self {
            current_step: WizardStep::DefineSource,
            selected_connector_id: Some(connector_id.into()),
            pre_selected: true,
            ..Self::new()
        }
    }

    /// Filters that participate in generated SQL; placeholder rows are
    /// excluded but stay editable in the list.
    pub fn active_filters(&self) -> impl Iterator<Item = &FilterCondition> {
        self.filters.iter().filter(|f| f.is_active())
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
