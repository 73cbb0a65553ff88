//! Error types for the copy engine.

use thiserror::Error;

/// Main error type for copy operations.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Configuration error (invalid JSON, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure to reach or prepare one side of the pipeline.
    #[error("Connection error ({side}): {message}")]
    Connection { side: String, message: String },

    /// Target table could not be created after a failed existence probe.
    #[error("Schema error for table {table}: {message}")]
    Schema { table: String, message: String },

    /// Failure while streaming rows into the target.
    #[error("Copy failed for table {table}: {message}")]
    Copy { table: String, message: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FlowError {
    /// Create a Connection error for the given side of the pipeline.
    pub fn connection(side: impl Into<String>, message: impl Into<String>) -> Self {
        FlowError::Connection {
            side: side.into(),
            message: message.into(),
        }
    }

    /// Create a Schema error.
    pub fn schema(table: impl Into<String>, message: impl Into<String>) -> Self {
        FlowError::Schema {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a Copy error.
    pub fn copy(table: impl Into<String>, message: impl Into<String>) -> Self {
        FlowError::Copy {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Map the error class to a process exit code.
    pub fn exit_code(&self) -> u8 {
        match self {
            FlowError::Config(_) => 2,
            FlowError::Connection { .. } => 3,
            FlowError::Schema { .. } => 4,
            FlowError::Copy { .. } => 5,
            FlowError::Io(_) | FlowError::Json(_) => 1,
        }
    }
}

/// Result type alias for copy operations.
pub type Result<T> = std::result::Result<T, FlowError>;
