//! Error types for the asset pipeline.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while processing models or writing outputs.
#[derive(Debug)]
pub enum Error {
    /// The source model for a ship does not exist.
    MissingSource {
        /// The path that was looked up.
        path: PathBuf,
    },
    /// A filesystem operation failed.
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path it was applied to.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The compression tool could not be started.
    Spawn {
        /// The program that was invoked.
        program: String,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The compression tool exited unsuccessfully.
    Tool {
        /// The program that was invoked.
        program: String,
        /// Its exit status.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },
    /// The report could not be serialized.
    Report(serde_json::Error),
}

impl Error {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingSource { path } => {
                write!(f, "source model {} does not exist", path.display())
            }
            Error::Io {
                operation,
                path,
                source,
            } => write!(f, "failed to {operation} {}: {source}", path.display()),
            Error::Spawn { program, source } => {
                write!(f, "failed to start {program}: {source}")
            }
            Error::Tool {
                program,
                status,
                stderr,
            } => {
                write!(f, "{program} exited with {status}")?;
                if !stderr.is_empty() {
                    write!(f, ": {stderr}")?;
                }
                Ok(())
            }
            Error::Report(e) => write!(f, "failed to serialize report: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } | Error::Spawn { source, .. } => Some(source),
            Error::Report(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Report(e)
    }
}
