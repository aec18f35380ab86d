//! Configuration options, loading and migration.

pub mod persistence;
pub mod types;
