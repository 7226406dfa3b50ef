//! Error types for the computation engine.
//!
//! The engine has a single failure class: the caller built its input wrong
//! (a record names a machine outside the roster, a period label is
//! malformed, a date range is inverted). Missing optional numbers are never
//! errors; they count as zero.

use std::fmt;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Structured context for engine errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "compute_kpis")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "machine", "period")
    pub entity: Option<String>,
    /// The offending value if applicable
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for engine operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The caller supplied input the engine refuses to coerce.
    #[error("Invalid input: {message} {context}")]
    InvalidInput {
        message: String,
        context: ErrorContext,
    },
}

impl EngineError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an invalid input error with context.
    pub fn invalid_input_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::InvalidInput {
            message: message.into(),
            context,
        }
    }

    /// A machine id that is not part of the roster.
    pub fn unknown_machine(machine: &str) -> Self {
        Self::invalid_input_with_context(
            format!("machine '{}' is not in the roster", machine),
            ErrorContext::default()
                .with_entity("machine")
                .with_entity_id(machine),
        )
    }

    /// A period label that does not parse as a calendar month.
    pub fn invalid_period(value: &str, details: impl Into<String>) -> Self {
        Self::invalid_input_with_context(
            format!("'{}' is not a valid period (expected YYYY-MM)", value),
            ErrorContext::default()
                .with_entity("period")
                .with_entity_id(value)
                .with_details(details),
        )
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::InvalidInput { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::InvalidInput { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }
}
