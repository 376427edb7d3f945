//! Error types for populator-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading a workbook.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parse error on load, with file path and line context from serde_yaml.
    #[error("failed to parse workbook at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Parse error for an in-memory document.
    #[error("failed to parse workbook: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SourceError {
    SourceError::Io {
        path: path.into(),
        source,
    }
}
