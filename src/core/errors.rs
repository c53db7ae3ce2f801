//! Shared error types for the pipeline.

use crate::core::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Setup-time discovery failures. All of these are fatal: they abort the run
/// before any file is parsed.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("root directory for '{category}' does not exist: {path}")]
    MissingRoot { category: Category, path: PathBuf },

    #[error("root for '{category}' is not a directory: {path}")]
    NotADirectory { category: Category, path: PathBuf },

    #[error("failed to traverse '{category}' root {path}")]
    Traversal {
        category: Category,
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Per-file parse failures. Recoverable: the pipeline logs them and moves on
/// to the next file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{file}: could not read file")]
    Unreadable {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: record is truncated (unbalanced parentheses)")]
    Truncated { file: PathBuf },

    #[error("{file}: missing or unsupported setup property '{setup}'")]
    UnknownVariant { file: PathBuf, setup: String },

    #[error("{file}: no move section in record")]
    NoMoves { file: PathBuf },

    #[error("{file}: malformed {property} property: {detail}")]
    MalformedProperty {
        file: PathBuf,
        property: &'static str,
        detail: String,
    },
}

impl ParseError {
    pub fn file(&self) -> &PathBuf {
        match self {
            ParseError::Unreadable { file, .. }
            | ParseError::Truncated { file }
            | ParseError::UnknownVariant { file, .. }
            | ParseError::NoMoves { file }
            | ParseError::MalformedProperty { file, .. } => file,
        }
    }
}

/// Run-level failures raised after setup completed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("metric '{metric}' failed while analyzing {file}")]
    MetricUpdate {
        metric: String,
        file: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("metric '{metric}' failed to persist its result")]
    MetricSave {
        metric: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{failed} of {attempted} metrics failed to persist: {names}")]
    SaveSummary {
        failed: usize,
        attempted: usize,
        names: String,
    },
}
