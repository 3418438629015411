//! Core data structures for the tnotes application.
//!
//! This module contains the persisted entities (Note, Project, Category)
//! and the in-memory working copy the editing workflow assembles.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named grouping that every note belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Store-assigned identifier
    pub id: i64,
    /// Unique, human readable name
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named tag, selectable only for the projects it is associated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Represents a single persisted note, joined with its project and category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for the note, never empty once stored
    pub id: String,
    /// Note title
    pub title: String,
    /// Multi-line note body
    pub body: String,
    /// Free-form elapsed time label entered by the user
    pub total_time: String,
    pub project: Project,
    pub category: Option<Category>,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// The working copy of a note while it moves through the editing screens.
///
/// A draft without an id has never been saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    pub total_time: String,
    pub project: Option<Project>,
    pub category: Option<Category>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl NoteDraft {
    /// Creates an unsaved draft with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns the id of the stored note this draft edits, if any
    pub fn existing_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self {
            id: Some(note.id.clone()),
            title: note.title.clone(),
            body: note.body.clone(),
            total_time: note.total_time.clone(),
            project: Some(note.project.clone()),
            category: note.category.clone(),
            created_at: Some(note.created_at),
            updated_at: Some(note.updated_at),
        }
    }
}
