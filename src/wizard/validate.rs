use super::error::ValidationError;
use super::state::{SourceType, WizardState};

/// Validate the fully-assembled draft before submission. All rules are
/// independent; failures are collected rather than short-circuited so the
/// UI can annotate every offending field at once.
///
/// Partially-filled filter rows are not a failure here: they are silently
/// dropped from the generated config instead.
pub fn validate(state: &WizardState) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if state.endpoint_name.trim().is_empty() {
        errors.push(ValidationError::new("endpointName", "endpoint name required"));
    }

    match state.source_type {
        SourceType::Table => {
            if state.table_name.is_empty() {
                errors.push(ValidationError::new("table", "table required"));
            }
            if state.selected_columns.is_empty() {
                errors.push(ValidationError::new("columns", "at least one column required"));
            }
            for column in state.masking_config.keys() {
                if !state.selected_columns.contains(column) {
                    errors.push(ValidationError::new(
                        "masking",
                        format!("masking rule for unselected column '{column}'"),
                    ));
                }
            }
        }
        SourceType::CustomSql => {
            if state.custom_sql.trim().is_empty() {
                errors.push(ValidationError::new("sql", "SQL query required"));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
