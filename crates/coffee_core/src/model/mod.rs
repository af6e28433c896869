//! Domain model for the coffee catalog.
//!
//! # Responsibility
//! - Define plain records exchanged between callers and repositories.
//!
//! # Invariants
//! - Records hold no connection state; storage is the source of truth.

pub mod coffee;
