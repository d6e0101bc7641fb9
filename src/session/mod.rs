use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::clients::{
    ClientError, ConnectorDirectory, CreateEndpointRequest, DataEndpoint, EndpointRepository,
    QueryExecutor, TestQueryRequest, TestQueryResponse,
};
use crate::connector::{Connector, TableMetadata};
use crate::masking::{self, ColumnMaskingConfig};
use crate::query;
use crate::wizard::{self, ValidationError, WizardAction, WizardError, WizardState};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("draft is not ready to save")]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("a {0} request is already outstanding")]
    Busy(&'static str),

    #[error("wizard session is already {0}")]
    Finished(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Draft,
    Saved,
    Cancelled,
}

/// One wizard instance per user session: a single owner-held draft plus the
/// collaborators the flow talks to. All draft mutations are synchronous;
/// network calls are single-flight per action and stale responses (issued
/// under an older source revision) are dropped, never applied.
pub struct WizardSession {
    id: Uuid,
    state: WizardState,
    status: SessionStatus,
    directory: Arc<dyn ConnectorDirectory>,
    executor: Arc<dyn QueryExecutor>,
    repository: Arc<dyn EndpointRepository>,
    connectors: Vec<Connector>,
    tables: Vec<TableMetadata>,
    tables_revision: Option<u64>,
    preview: Option<TestQueryResponse>,
    test_in_flight: Arc<AtomicBool>,
    save_in_flight: Arc<AtomicBool>,
}

/// Holds one in-flight slot and releases it on drop, so a request future
/// abandoned at its await point cannot leave the session busy forever.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self(Arc::clone(flag)))
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl WizardSession {
    pub fn new(
        directory: Arc<dyn ConnectorDirectory>,
        executor: Arc<dyn QueryExecutor>,
        repository: Arc<dyn EndpointRepository>,
    ) -> Self {
        Self::with_state(WizardState::new(), directory, executor, repository)
    }

    /// Entry via "create endpoint from this connector": starts at step 2.
    pub fn for_connector(
        connector_id: impl Into<String>,
        directory: Arc<dyn ConnectorDirectory>,
        executor: Arc<dyn QueryExecutor>,
        repository: Arc<dyn EndpointRepository>,
    ) -> Self {
        Self::with_state(WizardState::with_connector(connector_id), directory, executor, repository)
    }

    fn with_state(
        state: WizardState,
        directory: Arc<dyn ConnectorDirectory>,
        executor: Arc<dyn QueryExecutor>,
        repository: Arc<dyn EndpointRepository>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            state,
            status: SessionStatus::Draft,
            directory,
            executor,
            repository,
            connectors: Vec::new(),
            tables: Vec::new(),
            tables_revision: None,
            preview: None,
            test_in_flight: Arc::new(AtomicBool::new(false)),
            save_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// Registered tables for the selected connector, if current. A stale
    /// snapshot (older source revision) is treated as absent.
    pub fn tables(&self) -> Option<&[TableMetadata]> {
        (self.tables_revision == Some(self.state.source_revision)).then_some(&self.tables[..])
    }

    pub fn preview(&self) -> Option<&TestQueryResponse> {
        self.preview.as_ref()
    }

    /// Apply a draft mutation or navigation action through the reducer.
    pub fn dispatch(&mut self, action: WizardAction) -> Result<(), SessionError> {
        self.ensure_active()?;

        let before = self.state.source_revision;
        self.state = wizard::reduce(self.state.clone(), action)?;
        if self.state.source_revision != before {
            // Source changed underneath any fetched preview
            self.preview = None;
        }
        Ok(())
    }

    pub async fn load_connectors(&mut self) -> Result<&[Connector], SessionError> {
        self.ensure_active()?;
        self.connectors = self.directory.list_approved().await?;
        Ok(&self.connectors)
    }

    /// Fetch the registered-table snapshot for the selected connector.
    /// Returns `None` when the source changed while the request was in
    /// flight; the stale payload is discarded.
    pub async fn load_tables(&mut self) -> Result<Option<&[TableMetadata]>, SessionError> {
        self.ensure_active()?;
        let connector_id = self
            .state
            .selected_connector_id
            .clone()
            .ok_or_else(|| ValidationError::new("connector", "connector required"))
            .map_err(WizardError::from)?;

        let issued_at = self.state.source_revision;
        let tables = self.directory.registered_tables(&connector_id).await?;

        if self.state.source_revision != issued_at {
            tracing::warn!(session_id = %self.id, connector_id, "dropping stale table list");
            return Ok(None);
        }
        self.tables = tables;
        self.tables_revision = Some(issued_at);
        Ok(Some(&self.tables[..]))
    }

    /// Run the current draft's query for preview, capped at the configured
    /// row limit. Single-flight: a second call while one is outstanding is
    /// rejected. Returns `None` when the response went stale in flight.
    pub async fn test_query(&mut self) -> Result<Option<&TestQueryResponse>, SessionError> {
        self.ensure_active()?;
        let _guard =
            InFlightGuard::acquire(&self.test_in_flight).ok_or(SessionError::Busy("test"))?;
        let connector_id = self
            .state
            .selected_connector_id
            .clone()
            .ok_or_else(|| ValidationError::new("connector", "connector required"))
            .map_err(WizardError::from)?;

        let preview_config = &crate::config::config().preview;
        let request = TestQueryRequest {
            connector_id,
            query_config: query::build(&self.state),
            limit: Some(preview_config.row_limit.min(preview_config.max_row_limit)),
        };

        let issued_at = self.state.source_revision;
        let response = self.executor.test(request).await?;
        if self.state.source_revision != issued_at {
            tracing::warn!(session_id = %self.id, "dropping stale query preview");
            return Ok(None);
        }
        self.preview = Some(response);
        Ok(self.preview.as_ref())
    }

    /// Preview rows with the draft's masking rules applied, for display.
    pub fn masked_preview_rows(&self) -> Vec<HashMap<String, Value>> {
        match &self.preview {
            Some(response) => mask_rows(&response.rows, &self.state.masking_config),
            None => Vec::new(),
        }
    }

    pub fn sql_preview(&self) -> String {
        query::render_sql_preview(&self.state)
    }

    /// Validate the draft and submit it. Issues exactly one create call per
    /// successful wizard completion; afterwards the session is terminal.
    pub async fn save(&mut self) -> Result<DataEndpoint, SessionError> {
        self.ensure_active()?;
        let _guard =
            InFlightGuard::acquire(&self.save_in_flight).ok_or(SessionError::Busy("save"))?;
        wizard::validate::validate(&self.state).map_err(SessionError::Invalid)?;

        let connector_id = self
            .state
            .selected_connector_id
            .clone()
            .ok_or_else(|| ValidationError::new("connector", "connector required"))
            .map_err(WizardError::from)?;

        let request = CreateEndpointRequest {
            name: self.state.endpoint_name.clone(),
            description: (!self.state.description.is_empty())
                .then(|| self.state.description.clone()),
            connector_id,
            query_config: query::build(&self.state),
            masking_config: (!self.state.masking_config.is_empty())
                .then(|| self.state.masking_config.clone()),
        };

        let endpoint = self.repository.create(request).await?;
        tracing::info!(session_id = %self.id, endpoint_id = %endpoint.id, "endpoint created");
        self.status = SessionStatus::Saved;
        Ok(endpoint)
    }

    /// Abort the flow; the draft is discarded.
    pub fn cancel(&mut self) {
        self.status = SessionStatus::Cancelled;
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Draft => Ok(()),
            SessionStatus::Saved => Err(SessionError::Finished("saved")),
            SessionStatus::Cancelled => Err(SessionError::Finished("cancelled")),
        }
    }
}

/// Apply per-column masking rules to result rows. Masked cells become
/// strings; unmasked cells pass through untouched.
pub fn mask_rows(
    rows: &[HashMap<String, Value>],
    config: &ColumnMaskingConfig,
) -> Vec<HashMap<String, Value>> {
    if config.is_empty() {
        return rows.to_vec();
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(column, value)| {
                    let masked = match config.get(column) {
                        Some(rule) => Value::String(masking::mask(&cell_text(value), rule)),
                        None => value.clone(),
                    };
                    (column.clone(), masked)
                })
                .collect()
        })
        .collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
