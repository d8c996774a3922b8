//! Error type for the command-line client.

use std::path::PathBuf;

use ripdraw_protocol::ProtocolError;
use thiserror::Error;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The device or the link failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A configuration or scene file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration or scene file is not valid YAML for its schema.
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl CliError {
    /// Whether the serial link is no longer usable.
    pub fn is_connection_fatal(&self) -> bool {
        matches!(self, CliError::Protocol(e) if e.is_connection_fatal())
    }
}

/// Result alias for the CLI.
pub type Result<T> = std::result::Result<T, CliError>;
