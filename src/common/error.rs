use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide error type.
///
/// Use cases and infrastructure return this; the CLI layer decides how to
/// present it. Variants carry enough structure for callers to match on
/// the failure class without parsing message text.
#[derive(Debug, Error)]
pub enum MultirepoError {
    /// A repository endpoint that is neither scp-like nor acceptable.
    #[error("invalid repository URL: {0}")]
    InvalidRepositoryUrl(String),

    /// File system operation failed.
    #[error("file system operation failed: {message}")]
    FileSystem {
        /// What was being attempted.
        message: String,
        /// The path involved, when known.
        path: Option<PathBuf>,
        /// The underlying I/O error, when there is one.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The workspace lock could not be acquired or created.
    #[error("cannot lock workspace: {message}")]
    Lock {
        /// What went wrong.
        message: String,
        /// The lock file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The repository index could not be encoded or decoded.
    #[error("repository index error: {message}")]
    Serialization {
        /// What was being attempted.
        message: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// An external command failed to start or exited non-zero.
    #[error("{message}: {command}")]
    Command {
        /// What went wrong.
        message: String,
        /// The rendered command line.
        command: String,
        /// The exit code, when the process ran at all.
        exit_code: Option<i32>,
        /// The spawn error, when the process never ran.
        #[source]
        source: Option<std::io::Error>,
    },

    /// A subcommand received an unusable set of positional arguments.
    #[error("{0}")]
    Usage(String),
}

impl MultirepoError {
    /// File system error without an underlying cause.
    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path,
            source: None,
        }
    }

    /// File system error wrapping an I/O error.
    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    /// Lock acquisition error.
    pub fn lock_error(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Lock {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    /// Index encoding or decoding error.
    pub fn serialization_error(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Command failure with a known exit code.
    pub fn command_error(
        message: impl Into<String>,
        command: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::Command {
            message: message.into(),
            command: command.into(),
            exit_code,
            source: None,
        }
    }

    /// Command that could not be spawned at all.
    pub fn command_error_with_source(
        message: impl Into<String>,
        command: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Command {
            message: message.into(),
            command: command.into(),
            exit_code: None,
            source: Some(source),
        }
    }

    /// Usage error for a bad positional argument arrangement.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
