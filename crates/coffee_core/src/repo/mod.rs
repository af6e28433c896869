//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the coffee data access contract.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repository APIs report absence as `None`/empty results, never as errors.
//! - Storage engine errors surface unchanged apart from classification.

pub mod coffee_repo;
