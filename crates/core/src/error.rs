use crate::model::ComponentKind;
use widgetry_storage::StorageError;

/// A compiler refused its config. No markup is produced when this is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// A required field is missing or malformed.
    #[error("invalid {component} config: {field}: {message}")]
    Validation {
        component: ComponentKind,
        field: String,
        message: String,
    },
}

impl CompileError {
    pub(crate) fn validation(
        component: ComponentKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CompileError::Validation {
            component,
            field: field.into(),
            message: message.into(),
        }
    }

    /// The config field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            CompileError::Validation { field, .. } => field,
        }
    }
}

/// Errors from the generation pipeline as a whole.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// The request itself is unusable (missing user id, blank description).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The config could not be captured for the registry.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}
