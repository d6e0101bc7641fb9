use thiserror::Error;

/// Failures crossing the collaborator boundary. None are fatal: every
/// variant returns control to the current wizard step with the draft
/// intact.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connector/table list fetch failure; surfaced with a retry affordance.
    #[error("network error: {0}")]
    Network(String),

    /// Remote query failure; surfaced inline, the user may retry or go back.
    #[error("query execution failed: {0}")]
    Execution(String),

    /// Response arrived but could not be understood.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Banner text for the UI: the collaborator's reported message, or a
    /// generic fallback when none is provided.
    pub fn banner_message(&self) -> String {
        let detail = match self {
            ClientError::Network(msg) | ClientError::Execution(msg) | ClientError::Decode(msg) => {
                msg
            }
        };
        if detail.trim().is_empty() {
            "Something went wrong. Please try again.".to_string()
        } else {
            detail.clone()
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}
