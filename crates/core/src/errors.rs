use std::path::PathBuf;

/// Result type alias for memo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for memo operations
///
/// Cache operations themselves never fail; this type covers the layers around
/// them (settings files, environment overrides).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        recovery_hint: RecoveryHint,
    },

    /// Environment variable carried a value that could not be interpreted
    #[error("environment variable '{variable}' error: {message}")]
    Environment {
        variable: String,
        message: String,
        recovery_hint: RecoveryHint,
    },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
        recovery_hint: RecoveryHint,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
        recovery_hint: RecoveryHint,
    },
}

/// Recovery hints for error handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryHint {
    /// Check file permissions
    CheckPermissions { path: PathBuf },

    /// Fix the offending setting
    UpdateConfiguration,

    /// Fall back to the default value
    UseDefault { value: String },

    /// No automated recovery possible
    Manual { instructions: String },
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
            recovery_hint: RecoveryHint::Manual {
                instructions: "Check settings file syntax".to_string(),
            },
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            recovery_hint: RecoveryHint::UpdateConfiguration,
        }
    }

    /// Create an environment variable error
    #[must_use]
    pub fn environment(
        variable: impl Into<String>,
        message: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Error::Environment {
            variable: variable.into(),
            message: message.into(),
            recovery_hint: RecoveryHint::UseDefault {
                value: default.into(),
            },
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        let path = path.into();
        Error::FileSystem {
            recovery_hint: RecoveryHint::CheckPermissions { path: path.clone() },
            path,
            operation: operation.into(),
            source,
        }
    }

    /// Get the recovery hint for this error
    #[must_use]
    pub const fn recovery_hint(&self) -> &RecoveryHint {
        match self {
            Self::Configuration { recovery_hint, .. }
            | Self::Environment { recovery_hint, .. }
            | Self::FileSystem { recovery_hint, .. }
            | Self::Json { recovery_hint, .. } => recovery_hint,
        }
    }
}

/// Wraps foreign errors as configuration errors naming what was being loaded
pub trait ResultExt<T> {
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Like [`ResultExt::context`], building the message only on failure
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        let message = message.into();
        self.with_context(|| message)
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let cause: Error = e.into();
            Error::configuration(format!("{}: {cause}", f()))
        })
    }
}
