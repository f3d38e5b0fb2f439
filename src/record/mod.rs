//! Record data model.
//!
//! Input and output records are untyped maps of dynamic values.

pub mod map;
pub mod value;

pub use map::*;
pub use value::*;
