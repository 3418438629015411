//! The note editing workflow.
//!
//! A note is composed across a fixed sequence of screens
//! (list → title → body → time → project → category). [`AppState`] holds the
//! cursors, input fields and working copy for all of them and advances one
//! [`AppEvent`] at a time, returning at most one [`Effect`] for the
//! coordinator to carry out.
mod key;
mod state;

pub use key::Key;
pub use state::{AppState, Banner};

use crate::{Category, NoteStore, Result, TaskCompletion, TaskRequest};

/// The screens of the editing workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Title,
    Body,
    Time,
    ProjectSelect,
    CategorySelect,
}

/// Everything the state machine reacts to, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key press from the terminal
    Key(Key),
    /// A background task reported back
    Task(TaskCompletion),
    /// Periodic wake-up, drives the loading indicator
    Tick,
}

/// What the coordinator has to do after an event was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    /// Hand the request to the task runner
    Launch(TaskRequest),
    /// End the session
    Quit,
}

/// Synchronous category lookups the project picker needs.
pub trait CategorySource {
    fn categories_for_project(&self, project_id: i64) -> Result<Vec<Category>>;
}

impl CategorySource for NoteStore {
    fn categories_for_project(&self, project_id: i64) -> Result<Vec<Category>> {
        self.list_categories_for_project(project_id)
    }
}
