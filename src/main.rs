//! Main entry point for the habit journal CLI.
//!
//! Sets up logging, resolves the database path, loads the application
//! state, and runs a single command against it.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use habit_journal::{App, SqliteStore};

mod cli;

/// Pick a writable default location for the database file.
fn default_database_path() -> Result<PathBuf, std::io::Error> {
    let candidates = [
        dirs::data_dir().map(|p| p.join("habit-journal")),
        dirs::home_dir().map(|p| p.join(".habit-journal")),
    ];

    for dir in candidates.into_iter().flatten() {
        if std::fs::create_dir_all(&dir).is_ok() {
            return Ok(dir.join("journal.db"));
        }
    }

    // Last resort: temporary directory
    let dir = std::env::temp_dir().join("habit-journal");
    std::fs::create_dir_all(&dir)?;
    tracing::warn!("Using temporary directory for database: {}", dir.display());
    Ok(dir.join("journal.db"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Cli::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_journal={log_level}"))
        .with_writer(std::io::stderr) // keep stdout for command output
        .init();

    let db_path = match args.database.clone() {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let storage = Arc::new(SqliteStore::new(db_path)?);
    let mut app = App::new(storage).await?;

    if let Err(err) = cli::run(args, &mut app).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    Ok(())
}
