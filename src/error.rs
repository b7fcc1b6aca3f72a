//! Error types for problem setup and solution persistence.
//!
//! Everything that can go wrong while setting up a tiling problem is reported
//! as a [`ConfigError`] before the search starts. The search itself cannot fail.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A malformed board, piece set, or constraint matrix.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("shape has no cells")]
    EmptyShape,

    #[error("shape row {row} has {found} cells, expected {expected}")]
    RaggedShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("piece '{name}' occupies no cells")]
    EmptyPiece { name: String },

    #[error("no pieces were supplied")]
    NoPieces,

    #[error("constraint matrix row {row} has {found} columns, expected {expected}")]
    NonRectangularMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{month:02}-{day:02} is not a calendar date")]
    InvalidDate { month: u32, day: u32 },
}

/// Failure while reading or writing solver output files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to {operation} {}", .path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl PersistenceError {
    pub(crate) fn io(path: &Path, operation: &'static str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            operation,
            source,
        }
    }
}
