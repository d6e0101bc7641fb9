use serde::{Deserialize, Serialize};

use crate::masking::MaskingRule;
use crate::query::types::{FilterCondition, SortConfig};

use super::state::SourceType;

/// Every mutation the step views can apply to the draft. The reducer in
/// [`super::machine`] is the only writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WizardAction {
    SelectConnector { connector_id: String },
    SetSourceType { source_type: SourceType },
    SetTableName { table_name: String },
    SetCustomSql { sql: String },
    SetSelectedColumns { columns: Vec<String> },
    ToggleColumn { column: String },
    AddFilter,
    UpdateFilter { index: usize, filter: FilterCondition },
    RemoveFilter { index: usize },
    SetSortOrder { sort: Option<SortConfig> },
    SetMaskingRule { column: String, rule: MaskingRule },
    RemoveMaskingRule { column: String },
    SetEndpointName { name: String },
    SetDescription { description: String },
    Advance,
    Retreat,
}
