use std::path::PathBuf;

use clap::Parser;

/// Application-level constants
pub const APP_NAME: &str = "ClinicDesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the SQLite store inside the data directory.
pub const DATABASE_FILE: &str = "clinic.db";

/// Get the application data directory
/// ~/ClinicDesk/ on all platforms; the working directory when no home exists.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default location of the SQLite store.
pub fn default_database_path() -> PathBuf {
    app_data_dir().join(DATABASE_FILE)
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    "clinicdesk_lib=info,clinicdesk=info".to_string()
}

/// Command-line options.
#[derive(Parser, Debug)]
#[command(name = "clinicdesk", version, about = "Patient registry and appointment desk", long_about = None)]
pub struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, env = "CLINICDESK_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Use a throwaway in-memory database. Takes precedence over `--db`.
    #[arg(long)]
    pub memory: bool,

    /// Log level for this crate when RUST_LOG is unset (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Where the store lives for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

/// Settings resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseLocation,
    pub log_filter: String,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let database = if cli.memory {
            DatabaseLocation::Memory
        } else {
            DatabaseLocation::File(cli.db.unwrap_or_else(default_database_path))
        };
        let log_filter = match cli.log_level {
            Some(level) => format!("clinicdesk_lib={level},clinicdesk={level}"),
            None => default_log_filter(),
        };
        AppConfig { database, log_filter }
    }
}
