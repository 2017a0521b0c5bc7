//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
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
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Rotating sink error with path
    #[error("Rotating sink error for '{path}': {message}")]
    Rotation { path: String, message: String },

    /// Encoder error with encoder name
    #[error("Encoder error ({encoder}): {message}")]
    Encoder { encoder: String, message: String },
}

impl LogError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LogError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a rotating sink error
    pub fn rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::Rotation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an encoder error
    pub fn encoder(encoder: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::Encoder {
            encoder: encoder.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LogError::config("RollingWriter", "empty prefix");
        assert!(matches!(err, LogError::InvalidConfiguration { .. }));

        let err = LogError::rotation("/var/log/app", "permission denied");
        assert!(matches!(err, LogError::Rotation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LogError::rotation("/var/log/app", "disk full");
        assert_eq!(
            err.to_string(),
            "Rotating sink error for '/var/log/app': disk full"
        );

        let err = LogError::encoder("json", "non-finite float");
        assert_eq!(err.to_string(), "Encoder error (json): non-finite float");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LogError::io_operation("creating log directory", "cannot create dir", io_err);

        assert!(matches!(err, LogError::IoOperation { .. }));
        assert!(err.to_string().contains("creating log directory"));
    }
}
