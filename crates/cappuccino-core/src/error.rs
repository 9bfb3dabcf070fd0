//! Error types for the manifest engine

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Broad category of an [`EngineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed manifest or repository URL; raised before the tree is touched
    Validation,
    /// Filesystem failure while executing an operation
    Io,
    /// External command failed to start, exited non-zero or timed out
    Process,
}

/// Everything that can end a run.
///
/// Variants wrapping a lower-level error keep it as `#[source]` and leave it
/// out of their own message; print with `{:#}` to get the full chain.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Repository URL is not a clonable git address
    #[error("Git url format is not valid: {0}")]
    InvalidUrl(String),

    /// `.cappuccino.yml` is missing or unreadable
    #[error("Error opening {} file", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `.cappuccino.yml` is not valid YAML for the manifest schema
    #[error("Error parsing {}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A content entry lacks a field its type requires
    #[error("Action '{action}', entry {entry}: {reason}")]
    InvalidEntry {
        action: String,
        /// 1-based position of the entry inside its action
        entry: usize,
        reason: String,
    },

    /// Filesystem call failed; `op` names the primitive (copy, delete, ...)
    #[error("{op} {}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Child process could not be started
    #[error("Failed to execute '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Child process exited non-zero or was killed by a signal
    #[error("'{command}' failed (exit {}): {}", exit_label(.code), .stderr.trim())]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Child process outlived the exec timeout and was killed
    #[error("'{command}' timed out after {} seconds", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },
}

impl EngineError {
    /// Category used to group failures in the final report
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_)
            | Self::ManifestRead { .. }
            | Self::ManifestParse { .. }
            | Self::InvalidEntry { .. } => ErrorKind::Validation,
            Self::Io { .. } => ErrorKind::Io,
            Self::Spawn { .. } | Self::CommandFailed { .. } | Self::Timeout { .. } => {
                ErrorKind::Process
            }
        }
    }

    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
