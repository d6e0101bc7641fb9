use std::collections::BTreeSet;

use super::TableMetadata;

/// Selection state for the connector-registration table picker.
///
/// The search term only narrows what is visible; selections made outside
/// the current filter are preserved until explicitly deselected.
#[derive(Debug, Clone, Default)]
pub struct TableSelection {
    available: Vec<TableMetadata>,
    selected: BTreeSet<String>,
    search_term: String,
}

impl TableSelection {
    pub fn new(available: Vec<TableMetadata>) -> Self {
        Self { available, selected: BTreeSet::new(), search_term: String::new() }
    }

    /// Tables passing the current search filter, in discovery order.
    pub fn visible(&self) -> Vec<&TableMetadata> {
        let needle = self.search_term.to_lowercase();
        self.available
            .iter()
            .filter(|t| needle.is_empty() || t.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn is_selected(&self, table_name: &str) -> bool {
        self.selected.contains(table_name)
    }

    pub fn selected_names(&self) -> Vec<&str> {
        self.selected.iter().map(String::as_str).collect()
    }

    /// Selected tables with their full metadata, for submission.
    pub fn selected_tables(&self) -> Vec<&TableMetadata> {
        self.available.iter().filter(|t| self.selected.contains(&t.name)).collect()
    }

    pub fn toggle(&mut self, table_name: &str) {
        if !self.selected.remove(table_name) {
            self.selected.insert(table_name.to_string());
        }
    }

    /// Replace the selection with everything currently visible. Scoped to
    /// the filtered subset, not the full table list; prior selections
    /// outside the filter do not survive.
    pub fn select_all(&mut self) {
        self.selected = self.visible().iter().map(|t| t.name.clone()).collect();
    }

    /// Clear the whole selection, filtered or not.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Re-filter the visible list without touching the selection.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Registration requires at least one table.
    pub fn can_submit(&self) -> bool {
        !self.selected.is_empty()
    }
}
