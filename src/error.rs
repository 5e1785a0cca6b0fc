//! Error types for tree building, tag parsing and document writing.

use std::io;
use std::path::PathBuf;

/// Failure to place a comment in a document tree.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{file}:{line}: comment has no @{directive} directive")]
    MissingDirective {
        file: String,
        line: usize,
        directive: String,
    },
}

/// A tag whose raw text does not match its expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("expected `<name> - <description>`")]
    Description,
    #[error("expected `{{<type>}} <name> - <description>`")]
    Row,
    #[error("expected `{{<type>}} <description>`")]
    Returns,
}

/// Failure while writing one document to disk.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to prepare {}: {source}", .path.display())]
    Prepare { path: PathBuf, source: io::Error },

    #[error("{} of {total} files failed to write", .failures.len())]
    Files {
        failures: Vec<(PathBuf, io::Error)>,
        total: usize,
    },

    #[error("failed to write manifest {}: {source}", .path.display())]
    Manifest { path: PathBuf, source: io::Error },

    #[error("output directory {} already belongs to document {owner:?}", .path.display())]
    DuplicateDirectory { path: PathBuf, owner: String },

    #[error("write task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}
