use thiserror::Error;

/// Step-blocking, recoverable input failure. The user corrects the named
/// field and retries the same transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("step {0} cannot be left backwards")]
    StepLocked(u8),

    #[error("no transition from step {0}")]
    NoTransition(u8),

    #[error("invalid action: {0}")]
    InvalidAction(String),
}
