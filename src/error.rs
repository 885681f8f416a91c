//! Error types for file indexing and symbol extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the indexer and the extractor.
///
/// Nothing in the core recovers from these locally; callers decide how
/// to present them.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error in {} at line {line}, column {column}", .path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("Function '{name}' is not indexed in {}", .file.display())]
    NotIndexed { file: PathBuf, name: String },

    #[error("Invalid exclusion rule in {}: {source}", .path.display())]
    InvalidRule {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("Invalid path '{}': {reason}", .path.display())]
    InvalidPath { path: PathBuf, reason: String },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parser setup failed: {0}")]
    Parser(String),
}

/// Result type alias for indexer and extractor operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify an IO error raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Error::PermissionDenied { path, source },
            _ => Error::Io { path, source },
        }
    }

    /// Whether this error means the requested path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
