//! Error type for configuration loading.

use std::path::PathBuf;

use qimen_base::TableError;
use thiserror::Error;

/// Errors from reading or converting a configuration file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A name that does not denote any symbol or option value.
    #[error("unknown {kind} {name:?}")]
    UnknownName { kind: &'static str, name: String },
    #[error("{field}: expected {expected} entries, found {found}")]
    WrongCount {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{field}: no entry for {key}")]
    MissingEntry { field: &'static str, key: String },
    #[error("{field}: {key} given twice")]
    DuplicateEntry { field: &'static str, key: String },
    /// The converted tables failed validation.
    #[error(transparent)]
    Table(#[from] TableError),
}
