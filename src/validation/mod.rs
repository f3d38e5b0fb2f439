//! Schema definition module.
//!
//! Provides the schema side of validation:
//! - Field types and field descriptors
//! - Per-field hooks (preparse, postparse, custom checks)
//! - A registry of named engines

pub mod hooks;
pub mod registry;
pub mod schema;

pub use hooks::*;
pub use registry::*;
pub use schema::*;
