use serde::{Deserialize, Serialize};

/// Comparison operators offered by the visual query builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "IN")]
    In,
}

impl FilterOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Ne => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
            FilterOperator::Gte => ">=",
            FilterOperator::Lte => "<=",
            FilterOperator::Like => "LIKE",
            FilterOperator::In => "IN",
        }
    }
}

/// One row of the filter builder. A row with an empty field or value stays
/// editable in the UI but never reaches generated SQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterCondition {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self { field: field.into(), operator, value: value.into() }
    }

    /// Placeholder row as inserted by the "add filter" action.
    pub fn empty() -> Self {
        Self { field: String::new(), operator: FilterOperator::Eq, value: String::new() }
    }

    pub fn is_active(&self) -> bool {
        !self.field.is_empty() && !self.value.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// At most one active sort key per endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: String,
    pub direction: SortDirection,
}

/// Column reference inside a BUILDER config. Columns belong to exactly one
/// table; the wizard exposes no joins even though the shape would permit
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: String,
    pub name: String,
}

/// Canonical, backend-agnostic query artifact produced by the wizard.
/// The sole input to the query-execution collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum QueryConfig {
    #[serde(rename = "BUILDER", rename_all = "camelCase")]
    Builder {
        root_table: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<ColumnRef>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        filters: Option<Vec<FilterCondition>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        sort: Option<Vec<SortConfig>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<i64>,
    },
    #[serde(rename = "SQL", rename_all = "camelCase")]
    Sql {
        sql: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<i64>,
    },
}

impl QueryConfig {
    pub fn is_sql(&self) -> bool {
        matches!(self, QueryConfig::Sql { .. })
    }
}
