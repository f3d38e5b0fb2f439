//! Validation pipeline module.
//!
//! The schema engine and its per-call context:
//! - Field stripping
//! - Type coercion
//! - Required/default resolution
//! - Custom checks (sync and async)

pub mod context;
pub mod engine;

pub use context::*;
pub use engine::*;
