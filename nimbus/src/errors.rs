use thiserror::Error;

/// Errors surfaced by the nimbus core.
///
/// Routing outcomes (404, 405) are never errors; they are written into the
/// response by the dispatcher. Only configuration mistakes and failures that
/// escape the exception handler travel through this type.
#[derive(Debug, Error)]
pub enum NimbusError {
    #[error("Route '{0}' is already registered")]
    DuplicateRoute(String),

    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Exception handler failed: {0}")]
    ExceptionHandlerFailed(#[source] anyhow::Error),
}

impl NimbusError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        NimbusError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
