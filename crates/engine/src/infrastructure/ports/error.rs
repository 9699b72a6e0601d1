//! Error types for port operations.

/// World-state operation errors with context for debugging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldStateError {
    /// Backend operation failed - includes operation name for tracing.
    #[error("World state error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// Backend could not be reached at all (closed pool, exhausted connections).
    #[error("World state unavailable: {0}")]
    Unavailable(String),
}

impl WorldStateError {
    /// Create a Backend error with operation context.
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }

    /// Create an Unavailable error.
    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }
}
