//! Field policy decisions.
//!
//! - `resolution` - required/default handling for coerced fields
//! - `reject` - what a failed custom check turns into

pub mod reject;
pub mod resolution;

pub use reject::*;
pub use resolution::*;
