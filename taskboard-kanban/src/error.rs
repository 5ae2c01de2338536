//! Error types for the kanban state engine

use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban operations.
///
/// Board mutations never fail on their own: they report an
/// [`Outcome`](crate::Outcome). These variants surface when a caller asks for
/// a strict result via [`Outcome::into_result`](crate::Outcome::into_result),
/// when a response or config cannot be parsed, or when the writer task is gone.
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Task not found anywhere on the board
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Target column (optionally inside a group section) not found
    #[error("column not found: state {state}{}", .group.as_ref().map(|g| format!(" in group {g}")).unwrap_or_default())]
    ColumnNotFound { state: String, group: Option<String> },

    /// Task has no group section it can be routed into
    #[error("task {id} cannot be routed to any group section")]
    Unroutable { id: String },

    /// Operation requires the other board shape
    #[error("operation requires a {expected} board")]
    ShapeMismatch { expected: String },

    /// Task id already present on the board
    #[error("duplicate task ID: {id}")]
    DuplicateTask { id: String },

    /// Placement neighbor not found
    #[error("neighbor task not found: {id}")]
    NeighborNotFound { id: String },

    /// Column is not ordered by sequence
    #[error("column {state} is not sorted by sequence at index {index}")]
    UnsortedColumn { state: String, index: usize },

    /// Parse error
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// The board writer task has shut down
    #[error("board writer is closed")]
    WriterClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl KanbanError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error reports something missing from the board
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound { .. } | Self::ColumnNotFound { .. } | Self::NeighborNotFound { .. }
        )
    }
}
