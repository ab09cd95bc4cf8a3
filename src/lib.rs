pub mod config;
pub mod db;
pub mod models;
pub mod roster;
pub mod scheduling;
pub mod shell;

use std::io;

use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, Cli, DatabaseLocation};
use db::DatabaseError;
use shell::{Shell, ShellError};

/// Open (and bootstrap) the store named by the configuration.
pub fn open_store(location: &DatabaseLocation) -> Result<Connection, DatabaseError> {
    match location {
        DatabaseLocation::File(path) => db::open_database(path),
        DatabaseLocation::Memory => db::open_memory_database(),
    }
}

/// Run an interactive session on stdin/stdout against `conn`.
pub fn run_session(conn: &Connection) -> Result<(), ShellError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(conn, stdin.lock(), stdout.lock()).run()
}

/// Process entry point. Returns the exit code.
pub fn run() -> i32 {
    let config = AppConfig::from(Cli::parse());

    // Logs go to stderr so the menu on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let conn = match open_store(&config.database) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(error = %e, database = ?config.database, "Cannot open database");
            return 1;
        }
    };

    match run_session(&conn) {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "Session aborted");
            1
        }
    }
}
