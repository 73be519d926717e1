//! Error types for the completion merger.
//!
//! The only fallible collaborator in the crate is the external semantic
//! engine, which runs on arbitrary in-progress user input and is treated as
//! unreliable. Its failures are modeled here as a small taxonomy so that the
//! producer can recover from every one of them locally; no error from this
//! module ever reaches the host shell's input loop.

use std::{fmt, io};

/// Crate-wide `Result` type using [`SemanticError`] as the error.
pub type Result<T> = std::result::Result<T, SemanticError>;

/// Failure reported by a semantic completion engine.
///
/// Every variant is recoverable: the semantic producer logs the error and
/// yields zero candidates. The taxonomy exists so engine implementations can
/// report precisely what went wrong and tests can assert on it.
#[derive(Debug)]
pub enum SemanticError {
    /// The cursor row/column did not address a valid position in the source.
    InvalidPosition {
        /// Cursor row (0-based).
        row: usize,
        /// Cursor column (byte offset within the row).
        column: usize,
    },

    /// The source text could not be analyzed (bad syntax, bad escapes).
    MalformedSource(String),

    /// The source text could not be decoded by the engine.
    Encoding(String),

    /// An I/O error from the engine's internals (e.g. a missing support file).
    Io(io::Error),

    /// Any other internal engine failure.
    Internal(String),
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::InvalidPosition { row, column } => {
                write!(f, "invalid cursor position: row {row}, column {column}")
            }
            SemanticError::MalformedSource(msg) => write!(f, "malformed source: {msg}"),
            SemanticError::Encoding(msg) => write!(f, "encoding error: {msg}"),
            SemanticError::Io(err) => write!(f, "I/O error: {err}"),
            SemanticError::Internal(msg) => write!(f, "internal engine error: {msg}"),
        }
    }
}

impl std::error::Error for SemanticError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SemanticError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SemanticError {
    fn from(err: io::Error) -> Self {
        SemanticError::Io(err)
    }
}
