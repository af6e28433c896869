//! Startup configuration for the coffee store.
//!
//! # Responsibility
//! - Resolve the database location and logging settings once at startup.
//! - Hand the resolved value to whoever opens connections.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - No process-global state is kept here.

use crate::db::{open_db, DbResult};
use crate::logging::default_log_level;
use rusqlite::Connection;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "COFFEE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "COFFEE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "COFFEE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "coffees.sqlite3";

/// Resolved storage location and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file opened by `open`.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory; `None` leaves logging disabled.
    pub log_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Creates a config for `db_path` with build-mode logging defaults.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }

    /// Resolves config from `COFFEE_DB_PATH`, `COFFEE_LOG_LEVEL` and
    /// `COFFEE_LOG_DIR`.
    ///
    /// Falls back to `<temp_dir>/coffees.sqlite3` when no path is set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        Self {
            db_path,
            log_level: non_blank(LOG_LEVEL_ENV)
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: non_blank(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Opens the configured database with migrations applied.
    pub fn open(&self) -> DbResult<Connection> {
        open_db(&self.db_path)
    }
}
