use std::{
    fs::{self, OpenOptions},
    path::Path,
    process::ExitCode,
    sync::Arc,
};

use clap::Parser;
use log::{error, info};
use tnotes::{App, Cli, Config, NoteStore, Result};

/// Sends log output to `log_file`; the terminal itself belongs to the UI.
pub fn initialize_logger(log_file: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    let default_level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    info!("Logger initialized");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("tnotes failed: {}", e);
            eprintln!("tnotes: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }

    initialize_logger(&config.log_file, cli.verbose)?;
    info!("Application starting up");

    let store = NoteStore::open(&config.database_path)?;
    store.initialize()?;

    let app = App::new(Arc::new(store), config);
    app.run().await?;

    info!("Application shutting down");
    Ok(())
}
