use super::action::WizardAction;
use super::error::{ValidationError, WizardError};
use super::state::{SourceType, WizardState, WizardStep};
use super::steps;

/// Apply one action to the draft. Pure except for tracing; the returned
/// state is the only source of truth, so the reducer is unit-testable
/// without any UI harness.
pub fn reduce(mut state: WizardState, action: WizardAction) -> Result<WizardState, WizardError> {
    match action {
        WizardAction::SelectConnector { connector_id } => {
            if state.selected_connector_id.as_deref() != Some(connector_id.as_str()) {
                state.selected_connector_id = Some(connector_id);
                reset_source(&mut state);
            }
        }
        WizardAction::SetSourceType { source_type } => {
            if state.source_type != source_type {
                state.source_type = source_type;
                state.source_revision += 1;
                // The column builder's output is meaningless for the other
                // source kind; back to initial values.
                state.selected_columns.clear();
                state.filters.clear();
                state.sort_order = None;
                state.masking_config.clear();
            }
        }
        WizardAction::SetTableName { table_name } => {
            if state.table_name != table_name {
                state.table_name = table_name;
                state.source_revision += 1;
                // Columns belong to exactly one table
                state.selected_columns.clear();
                state.masking_config.clear();
            }
        }
        WizardAction::SetCustomSql { sql } => {
            state.custom_sql = sql;
        }
        WizardAction::SetSelectedColumns { columns } => {
            state.masking_config.retain(|col, _| columns.contains(col));
            state.selected_columns = columns;
        }
        WizardAction::ToggleColumn { column } => {
            if let Some(pos) = state.selected_columns.iter().position(|c| c == &column) {
                state.selected_columns.remove(pos);
                state.masking_config.remove(&column);
            } else {
                state.selected_columns.push(column);
            }
        }
        WizardAction::AddFilter => {
            state.filters.push(crate::query::types::FilterCondition::empty());
        }
        WizardAction::UpdateFilter { index, filter } => {
            let slot = state
                .filters
                .get_mut(index)
                .ok_or_else(|| WizardError::InvalidAction(format!("no filter at index {index}")))?;
            *slot = filter;
        }
        WizardAction::RemoveFilter { index } => {
            if index >= state.filters.len() {
                return Err(WizardError::InvalidAction(format!("no filter at index {index}")));
            }
            state.filters.remove(index);
        }
        WizardAction::SetSortOrder { sort } => {
            state.sort_order = sort;
        }
        WizardAction::SetMaskingRule { column, rule } => {
            // Masking keys stay a subset of the selected columns at all
            // times; the validator only reports what slipped past older
            // drafts.
            if !state.selected_columns.contains(&column) {
                return Err(ValidationError::new(
                    "masking",
                    format!("column '{column}' is not selected"),
                )
                .into());
            }
            state.masking_config.insert(column, rule);
        }
        WizardAction::RemoveMaskingRule { column } => {
            state.masking_config.remove(&column);
        }
        WizardAction::SetEndpointName { name } => {
            state.endpoint_name = name;
        }
        WizardAction::SetDescription { description } => {
            state.description = description;
        }
        WizardAction::Advance => return advance(state),
        WizardAction::Retreat => return retreat(state),
    }

    Ok(state)
}

/// Validate the current step and move to the next one per the step graph.
pub fn advance(mut state: WizardState) -> Result<WizardState, WizardError> {
    validate_step(&state)?;

    let next = steps::next_step(&state)
        .ok_or(WizardError::NoTransition(state.current_step.number()))?;

    tracing::debug!(
        from = state.current_step.number(),
        to = next.number(),
        "wizard advance"
    );
    state.current_step = next;
    Ok(state)
}

/// Move to the previous step, honoring the same skip rule as [`advance`].
/// Retreat out of step 2 is rejected when the connector was pre-selected,
/// since step 1 is not part of that flow.
pub fn retreat(mut state: WizardState) -> Result<WizardState, WizardError> {
    if state.current_step == WizardStep::DefineSource && state.pre_selected {
        return Err(WizardError::StepLocked(state.current_step.number()));
    }

    let prev = steps::previous_step(&state)
        .ok_or(WizardError::NoTransition(state.current_step.number()))?;

    tracing::debug!(
        from = state.current_step.number(),
        to = prev.number(),
        "wizard retreat"
    );
    state.current_step = prev;
    Ok(state)
}

/// Per-step preconditions gating [`advance`]. Preview (step 4) is
/// informational and has no gate.
fn validate_step(state: &WizardState) -> Result<(), ValidationError> {
    match state.current_step {
        WizardStep::SelectConnector => {
            if state.selected_connector_id.is_none() {
                return Err(ValidationError::new("connector", "connector required"));
            }
        }
        WizardStep::DefineSource => match state.source_type {
            SourceType::Table => {
                if state.table_name.is_empty() {
                    return Err(ValidationError::new("table", "table required"));
                }
            }
            SourceType::CustomSql => {
                if state.custom_sql.trim().is_empty() {
                    return Err(ValidationError::new("sql", "SQL query required"));
                }
            }
        },
        WizardStep::BuildQuery => {
            if state.selected_columns.is_empty() {
                return Err(ValidationError::new("columns", "at least one column required"));
            }
        }
        WizardStep::Preview | WizardStep::Finalize => {}
    }
    Ok(())
}

// Connector changed: the table list and any fetched preview are stale.
fn reset_source(state: &mut WizardState) {
    state.source_revision += 1;
    state.table_name.clear();
    state.selected_columns.clear();
    state.filters.clear();
    state.sort_order = None;
    state.masking_config.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::MaskingRule;
    use crate::query::types::{FilterCondition, FilterOperator, SortConfig, SortDirection};

    fn table_state_at(step: WizardStep) -> WizardState {
        let mut state = WizardState::new();
        state.selected_connector_id = Some("c1".to_string());
        state.source_type = SourceType::Table;
        state.table_name = "users".to_string();
        state.selected_columns = vec!["id".to_string(), "email".to_string()];
        state.current_step = step;
        state
    }

    #[test]
    fn advance_from_step_1_requires_connector() {
        let state = WizardState::new();
        let err = reduce(state, WizardAction::Advance).unwrap_err();
        assert_eq!(
            err,
            WizardError::Validation(ValidationError::new("connector", "connector required"))
        );
    }

    #[test]
    fn advance_from_step_2_requires_table_in_table_mode() {
        let mut state = table_state_at(WizardStep::DefineSource);
        state.table_name.clear();

        let err = advance(state.clone()).unwrap_err();
        match err {
            WizardError::Validation(v) => assert_eq!(v.field, "table"),
            other => panic!("expected validation error, got {other:?}"),
        }
        // rejected transition leaves the draft on step 2
        assert_eq!(state.current_step, WizardStep::DefineSource);
    }

    #[test]
    fn advance_from_step_2_requires_sql_in_custom_mode() {
        let mut state = table_state_at(WizardStep::DefineSource);
        state = reduce(state, WizardAction::SetSourceType { source_type: SourceType::CustomSql })
            .unwrap();

        let err = advance(state).unwrap_err();
        match err {
            WizardError::Validation(v) => assert_eq!(v.field, "sql"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn custom_sql_advance_skips_build_query_and_retreat_mirrors_it() {
        let mut state = table_state_at(WizardStep::DefineSource);
        state = reduce(state, WizardAction::SetSourceType { source_type: SourceType::CustomSql })
            .unwrap();
        state = reduce(state, WizardAction::SetCustomSql { sql: "SELECT * FROM users".into() })
            .unwrap();

        state = advance(state).unwrap();
        assert_eq!(state.current_step, WizardStep::Preview);

        state = retreat(state).unwrap();
        assert_eq!(state.current_step, WizardStep::DefineSource);
    }

    #[test]
    fn table_mode_advance_visits_build_query_and_retreat_mirrors_it() {
        let mut state = table_state_at(WizardStep::DefineSource);

        state = advance(state).unwrap();
        assert_eq!(state.current_step, WizardStep::BuildQuery);

        state = advance(state).unwrap();
        assert_eq!(state.current_step, WizardStep::Preview);

        state = retreat(state).unwrap();
        assert_eq!(state.current_step, WizardStep::BuildQuery);
    }

    #[test]
    fn advance_from_step_3_requires_a_column() {
        let mut state = table_state_at(WizardStep::BuildQuery);
        state.selected_columns.clear();

        let err = advance(state).unwrap_err();
        match err {
            WizardError::Validation(v) => assert_eq!(v.field, "columns"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn pre_selected_entry_starts_at_step_2_and_locks_retreat() {
        let state = WizardState::with_connector("c1");
        assert_eq!(state.current_step, WizardStep::DefineSource);
        assert_eq!(state.selected_connector_id.as_deref(), Some("c1"));

        let err = retreat(state).unwrap_err();
        assert_eq!(err, WizardError::StepLocked(2));
    }

    #[test]
    fn changing_table_resets_columns_and_masking() {
        let mut state = table_state_at(WizardStep::BuildQuery);
        state = reduce(
            state,
            WizardAction::SetMaskingRule {
                column: "email".to_string(),
                rule: MaskingRule::MaskAll,
            },
        )
        .unwrap();
        let revision = state.source_revision;

        state = reduce(state, WizardAction::SetTableName { table_name: "orders".into() }).unwrap();
        assert!(state.selected_columns.is_empty());
        assert!(state.masking_config.is_empty());
        assert_eq!(state.source_revision, revision + 1);
    }

    #[test]
    fn changing_connector_invalidates_source_state() {
        let mut state = table_state_at(WizardStep::DefineSource);
        let revision = state.source_revision;

        state = reduce(state, WizardAction::SelectConnector { connector_id: "c2".into() }).unwrap();
        assert!(state.table_name.is_empty());
        assert!(state.selected_columns.is_empty());
        assert_eq!(state.source_revision, revision + 1);

        // re-selecting the same connector is a no-op
        let same = reduce(state.clone(), WizardAction::SelectConnector { connector_id: "c2".into() })
            .unwrap();
        assert_eq!(same.source_revision, state.source_revision);
    }

    #[test]
    fn switching_to_custom_sql_clears_builder_state() {
        let mut state = table_state_at(WizardStep::DefineSource);
        state.filters.push(FilterCondition::new("status", FilterOperator::Eq, "active"));
        state.sort_order = Some(SortConfig { field: "id".into(), direction: SortDirection::Asc });
        state.masking_config.insert("email".to_string(), MaskingRule::MaskAll);

        state = reduce(state, WizardAction::SetSourceType { source_type: SourceType::CustomSql })
            .unwrap();
        assert!(state.selected_columns.is_empty());
        assert!(state.filters.is_empty());
        assert!(state.sort_order.is_none());
        assert!(state.masking_config.is_empty());
    }

    #[test]
    fn deselecting_a_column_drops_its_masking_rule() {
        let mut state = table_state_at(WizardStep::BuildQuery);
        state = reduce(
            state,
            WizardAction::SetMaskingRule {
                column: "email".to_string(),
                rule: MaskingRule::Partial { pattern: "***@***.com".into() },
            },
        )
        .unwrap();

        state = reduce(state, WizardAction::ToggleColumn { column: "email".into() }).unwrap();
        assert!(!state.selected_columns.contains(&"email".to_string()));
        assert!(!state.masking_config.contains_key("email"));
    }

    #[test]
    fn masking_rule_for_unselected_column_is_rejected() {
        let state = table_state_at(WizardStep::BuildQuery);
        let err = reduce(
            state,
            WizardAction::SetMaskingRule {
                column: "ssn".to_string(),
                rule: MaskingRule::MaskAll,
            },
        )
        .unwrap_err();

        match err {
            WizardError::Validation(v) => assert_eq!(v.field, "masking"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn filter_rows_are_editable_placeholders() {
        let mut state = table_state_at(WizardStep::BuildQuery);
        state = reduce(state, WizardAction::AddFilter).unwrap();
        assert!(!state.filters[0].is_active());

        state = reduce(
            state,
            WizardAction::UpdateFilter {
                index: 0,
                filter: FilterCondition::new("email", FilterOperator::Like, "%@example.com"),
            },
        )
        .unwrap();
        assert!(state.filters[0].is_active());

        let err = reduce(
            state,
            WizardAction::RemoveFilter { index: 5 },
        )
        .unwrap_err();
        assert!(matches!(err, WizardError::InvalidAction(_)));
    }
}
