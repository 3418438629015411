//! Terminal front end: argument parsing, key mapping and the session loop.
mod app;
mod args;
mod input;

pub use app::App;
pub use args::Cli;
pub use input::map_key;
