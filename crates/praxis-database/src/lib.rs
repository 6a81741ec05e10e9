//! # praxis-database
//!
//! PostgreSQL connection management and concrete implementations of the
//! Praxis persistence traits, plus in-memory implementations used by
//! tests and local development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
