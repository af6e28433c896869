//! Core data access for the coffee catalog.
//! This crate owns the `coffees` row mapping and its SQLite bootstrap.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::coffee::{Coffee, CoffeeKey, SupplierId};
pub use repo::coffee_repo::{CoffeeRepository, RepoError, RepoResult, SqliteCoffeeRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
