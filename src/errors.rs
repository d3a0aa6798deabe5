//! Error types for the quicknotes application.
//!
//! The note store itself never fails: lookups of unknown ids are silent
//! no-ops. These errors cover everything around it: configuration,
//! command parsing and output.

use std::io;

use thiserror::Error;

use crate::NoteId;

/// The main error type for the quicknotes application.
#[derive(Error, Debug)]
pub enum NotesError {
    /// Errors related to I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A command referred to a note that is not in the store.
    #[error("Note not found: {id}")]
    NoteNotFound { id: NoteId },

    /// User input that the entry point refuses to pass on to the store.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A shell line that could not be split or parsed.
    #[error("{message}")]
    CommandError { message: String },
}
