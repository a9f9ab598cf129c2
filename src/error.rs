use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the export pipeline
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether an interactive session should log this failure and keep going
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExportError::Io { .. } | ExportError::Xml(_))
    }

    /// Get the error code for structured reports
    pub fn error_code(&self) -> &'static str {
        match self {
            ExportError::Io { .. } => "IO_ERROR",
            ExportError::Xml(_) => "XML_ERROR",
            ExportError::Serialization(_) => "SERIALIZATION_ERROR",
            ExportError::Config(_) => "CONFIG_ERROR",
            ExportError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "recoverable": self.is_recoverable()
            }
        })
    }
}
