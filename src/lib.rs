//! recordschema-core - Runtime schema validation and coercion
//!
//! Given a declarative field schema and an arbitrary input record, the
//! engine produces a sanitized record: restricted to the schema's keys,
//! type-coerced, defaulted, and checked by per-field custom validators.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `record` - Dynamic values and records
//! - `coercion` - Field stripping and the type-to-parser table
//! - `validation` - Field types, descriptors, hooks, engine registry
//! - `policy` - Required/default resolution and reject policy
//! - `pipeline` - The schema engine (sync and async entry points)
//! - `logging` - Structured logging with schema/call context
//! - `error` - Error types
//!
//! ## Example
//!
//! ```
//! use recordschema_core::{FieldDescriptor, FieldType, Record, Schema, SchemaEngine, ValidateOptions};
//! use serde_json::json;
//!
//! let engine = SchemaEngine::new(
//!     Schema::new()
//!         .field("id", FieldDescriptor::new(FieldType::String).required())
//!         .field("active", FieldDescriptor::new(FieldType::Boolean).with_default(false)),
//! );
//!
//! let input = Record::from_json(json!({"id": 42, "active": "yes", "extra": 1})).unwrap();
//! let output = engine.validate(&input, &ValidateOptions::default()).unwrap();
//! assert_eq!(output.to_json().unwrap(), json!({"id": "42", "active": true}));
//! ```

pub mod coercion;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod policy;
pub mod record;
pub mod validation;

pub use error::{SchemaError, SchemaResult};
pub use pipeline::{SchemaEngine, ValidateOptions};
pub use record::{Callable, Record, Value};
pub use validation::{
    clear_registry, get_engine, register_engine, schema_names, unregister_engine, Check,
    FieldDescriptor, FieldSpec, FieldType, Schema, SchemaRegistry, Transform,
};

/// Initialize the logger.
///
/// Info level unless `RUST_LOG` says otherwise. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
