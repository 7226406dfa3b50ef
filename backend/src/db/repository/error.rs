//! Error types for repository operations.
//!
//! Repository errors reuse the engine's [`ErrorContext`] so a failure can be
//! traced to the operation and the record that caused it.

use crate::error::{EngineError, ErrorContext};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Input rejected before anything was written.
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// Reading or writing the backing files failed.
    #[error("Storage error: {message} {context}")]
    StorageError {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Create a validation error with context.
    pub fn validation_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ValidationError {
            message: message.into(),
            context,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a storage error with context.
    pub fn storage_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::StorageError {
            message: message.into(),
            context,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::StorageError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::StorageError { context, .. }
            | Self::InternalError { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }

    /// Whether the caller's input was rejected (as opposed to a storage fault).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }
}

impl From<EngineError> for RepositoryError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput { message, context } => {
                RepositoryError::ValidationError { message, context }
            }
        }
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::storage_with_context(
            err.to_string(),
            ErrorContext::default().with_details(format!("io_error_kind={:?}", err.kind())),
        )
    }
}

#[cfg(feature = "csv-repo")]
impl From<polars::error::PolarsError> for RepositoryError {
    fn from(err: polars::error::PolarsError) -> Self {
        RepositoryError::storage_with_context(
            err.to_string(),
            ErrorContext::default().with_details("polars_error"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_becomes_validation() {
        let err: RepositoryError = EngineError::unknown_machine("K-9").into();
        assert!(err.is_validation());
        assert_eq!(err.context().entity_id.as_deref(), Some("K-9"));

        let err = err.with_operation("record_total_hours");
        assert_eq!(err.context().operation.as_deref(), Some("record_total_hours"));
    }

    #[test]
    fn test_io_error_is_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = RepositoryError::from(io);
        assert!(matches!(err, RepositoryError::StorageError { .. }));
        assert!(!err.is_validation());
        assert!(err.to_string().starts_with("Storage error: read-only"));
    }

    #[test]
    fn test_configuration_and_internal_carry_empty_context() {
        let err = RepositoryError::configuration("bad type");
        assert_eq!(err.context(), &ErrorContext::default());
        assert!(matches!(
            RepositoryError::internal("poisoned"),
            RepositoryError::InternalError { .. }
        ));
    }
}
