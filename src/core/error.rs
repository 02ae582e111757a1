//! Error types for the diagnostic stream library

pub type Result<T> = std::result::Result<T, MlogError>;

#[derive(Debug, thiserror::Error)]
pub enum MlogError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Control-language parse or lookup failure; `column` is 1-based from
    /// the start of the control string
    #[error("control string error at column {column}: {message}")]
    Control { column: usize, message: String },

    /// Two distinct facilities registered under one control-name
    #[error("facility already registered under name '{name}'")]
    DuplicateFacility { name: String },

    /// Facility lookup failure
    #[error("no facility registered under name '{name}'")]
    UnknownFacility { name: String },

    /// Sink error (generic)
    #[error("sink error: {0}")]
    SinkError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl MlogError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        MlogError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a control-language error pinned to an input column
    pub fn control(column: usize, message: impl Into<String>) -> Self {
        MlogError::Control {
            column,
            message: message.into(),
        }
    }

    /// Create a duplicate-registration error
    pub fn duplicate(name: impl Into<String>) -> Self {
        MlogError::DuplicateFacility { name: name.into() }
    }

    /// Create an unknown-facility error
    pub fn unknown_facility(name: impl Into<String>) -> Self {
        MlogError::UnknownFacility { name: name.into() }
    }

    /// Create a sink error (generic)
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        MlogError::SinkError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MlogError::Other(msg.into())
    }
}
