//! Structured logging with schema and call context.
//!
//! Provides logging macros and utilities that include the schema name and
//! call id in every log message for easy correlation.

pub mod structured;

pub use structured::*;
