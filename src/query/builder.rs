use crate::wizard::state::{SourceType, WizardState};

use super::types::{ColumnRef, QueryConfig};

/// Derive the canonical [`QueryConfig`] from the wizard draft.
///
/// Custom SQL mode never attaches columns, filters, or sort, whatever the
/// draft accumulated in table mode beforehand.
pub fn build(state: &WizardState) -> QueryConfig {
    if state.source_type == SourceType::CustomSql {
        return QueryConfig::Sql { sql: state.custom_sql.clone(), limit: None };
    }

    QueryConfig::Builder {
        root_table: state.table_name.clone(),
        columns: Some(
            state
                .selected_columns
                .iter()
                .map(|c| ColumnRef { table: state.table_name.clone(), name: c.clone() })
                .collect(),
        ),
        filters: Some(state.filters.clone()),
        sort: state.sort_order.clone().map(|s| vec![s]),
        limit: None,
    }
}

/// Human-readable SQL for display next to the builder. Advisory only: the
/// authoritative SQL is generated server-side from the [`QueryConfig`].
///
/// Filters with an empty field or value are excluded; no selected columns
/// renders `*`.
pub fn render_sql_preview(state: &WizardState) -> String {
    if state.source_type == SourceType::CustomSql {
        return state.custom_sql.clone();
    }

    let cols = if state.selected_columns.is_empty() {
        "*".to_string()
    } else {
        state.selected_columns.join(", ")
    };

    let mut sql = format!("SELECT {}\nFROM {}", cols, state.table_name);

    let conditions: Vec<String> = state
        .active_filters()
        .map(|f| format!("{} {} '{}'", f.field, f.operator.as_sql(), f.value))
        .collect();
    if !conditions.is_empty() {
        sql.push_str(&format!("\nWHERE {}", conditions.join(" AND ")));
    }

    if let Some(sort) = &state.sort_order {
        if !sort.field.is_empty() {
            sql.push_str(&format!("\nORDER BY {} {}", sort.field, sort.direction.to_sql()));
        }
    }

    sql
}
