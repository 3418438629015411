//! Error types for the tnotes application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur while storing notes and driving the editing workflow.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the tnotes application.
#[derive(Error, Debug)]
pub enum NotesError {
    /// Errors raised by the embedded SQLite database.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Errors related to file and terminal I/O.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note was not found after an operation that should have produced it.
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// The project referenced by a note does not exist.
    #[error("Project not found: {id}")]
    ProjectNotFound { id: i64 },

    /// The category is not offered for the project the note belongs to.
    #[error("Category {category_id} is not associated with project {project_id}")]
    CategoryNotInProject { project_id: i64, category_id: i64 },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// for mutex lock acquisition issues
    #[error("{message}")]
    LockAcquisitionFailed { message: String },

    /// A background task was requested while another one is still running.
    #[error("A background task is already running")]
    TaskInFlight,

    /// A background task panicked or was aborted before reporting back.
    #[error("Background task failed: {message}")]
    TaskFailed { message: String },
}
