use std::path::PathBuf;

use clap::Parser;

/// Command line arguments, read once at startup
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Keyboard-driven terminal notes, grouped by project and category"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database holding the notes
    #[clap(long, value_parser)]
    pub database: Option<PathBuf>,

    /// File that receives the application log
    #[clap(long, value_parser)]
    pub log_file: Option<PathBuf>,

    /// Verbose logging
    #[clap(short, long)]
    pub verbose: bool,
}
