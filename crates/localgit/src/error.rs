//! Error types for localgit.
//!
//! Module-level errors ([`PathError`], [`GitError`]) describe failures of the
//! path validator and of git command execution. This module ties them into a
//! single crate-level [`Error`] used by configuration loading, the tool layer
//! and the CLI.

use std::path::PathBuf;

use thiserror::Error;

use crate::git::GitError;
use crate::repo::PathError;

/// The main error type for localgit operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Validation Errors ===
    /// A repository path was rejected by the validator.
    #[error("Repository path error: {0}")]
    Path(#[from] PathError),

    // === Git Errors ===
    /// A git operation failed.
    #[error("Failed to {action}: {source}")]
    Git {
        /// What was being attempted, e.g. "commit".
        action: &'static str,
        /// The underlying error.
        #[source]
        source: GitError,
    },

    // === Tool Errors ===
    /// Tool arguments were not a JSON object.
    #[error("Failed to parse arguments: {0}")]
    Arguments(String),

    /// A tool argument was missing or malformed.
    #[error("{name} {message}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// No tool is registered under the requested name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// Path that couldn't be written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for localgit operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a git error for the named action.
    #[must_use]
    pub fn git(action: &'static str, source: GitError) -> Self {
        Self::Git { action, source }
    }

    /// Create an invalid-argument error for the named tool argument.
    #[must_use]
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came from the repository path validator.
    #[must_use]
    pub fn is_path_error(&self) -> bool {
        matches!(self, Self::Path(_))
    }

    /// Check if this error came from a failed git command.
    #[must_use]
    pub fn is_git_error(&self) -> bool {
        matches!(self, Self::Git { .. })
    }
}
