//! Keyboard-driven terminal notes
//!
//! This library provides the note store, the background task runner and the
//! editing workflow behind the `tnotes` terminal application. Notes belong to
//! a project and optionally to one of the categories that project offers.

mod cli;
mod config;
mod errors;
mod helper;
mod note;
mod storage;
mod task_runner;
mod types;
mod ui;
mod workflow;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use helper::*;
pub use note::*;
pub use storage::*;
pub use task_runner::*;
pub use types::*;
pub use ui::{help_line, render, screen_lines};
pub use workflow::*;
