//! Declarative step graph. Each edge carries the predicate under which it is
//! taken; forward and backward navigation both read the same edge list, so
//! the custom-SQL skip rule lives in exactly one place.

use super::state::{SourceType, WizardState, WizardStep};

pub struct StepEdge {
    pub from: WizardStep,
    pub to: WizardStep,
    pub when: fn(&WizardState) -> bool,
}

fn always(_: &WizardState) -> bool {
    true
}

fn custom_sql(state: &WizardState) -> bool {
    state.source_type == SourceType::CustomSql
}

fn table_mode(state: &WizardState) -> bool {
    state.source_type == SourceType::Table
}

/// Forward edges in evaluation order; the first matching edge wins.
pub const EDGES: &[StepEdge] = &[
    StepEdge { from: WizardStep::SelectConnector, to: WizardStep::DefineSource, when: always },
    // Custom SQL skips the column/filter builder entirely
    StepEdge { from: WizardStep::DefineSource, to: WizardStep::Preview, when: custom_sql },
    StepEdge { from: WizardStep::DefineSource, to: WizardStep::BuildQuery, when: table_mode },
    StepEdge { from: WizardStep::BuildQuery, to: WizardStep::Preview, when: always },
    StepEdge { from: WizardStep::Preview, to: WizardStep::Finalize, when: always },
];

pub fn next_step(state: &WizardState) -> Option<WizardStep> {
    EDGES
        .iter()
        .find(|e| e.from == state.current_step && (e.when)(state))
        .map(|e| e.to)
}

pub fn previous_step(state: &WizardState) -> Option<WizardStep> {
    EDGES
        .iter()
        .find(|e| e.to == state.current_step && (e.when)(state))
        .map(|e| e.from)
}
