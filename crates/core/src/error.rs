//! Error types for the storefront core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling the storefront at startup.
///
/// Request-time operations (catalog lookup, library rendering) never fail;
/// every anomaly there is normalised into a valid value instead.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Configuration could not be read or deserialised.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Filesystem access failed.
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        /// What was being attempted (`read`, `write`, ...).
        action: &'static str,
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A data file contained invalid JSON.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Serialising a value to JSON failed.
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        /// Description of the value being serialised.
        what: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Two catalog records share the same id.
    #[error("duplicate catalog id '{0}'")]
    DuplicateId(String),

    /// The configured fallback id does not exist in the catalog.
    #[error("default game '{0}' is not in the catalog")]
    MissingDefault(String),

    /// A catalog record declares no genres.
    #[error("catalog record '{0}' has no genres")]
    EmptyGenres(String),
}

impl VaultError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the core crate.
pub type Result<T> = std::result::Result<T, VaultError>;
