//! Core types, configuration schemas, and error handling shared by all
//! Praxis crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;
