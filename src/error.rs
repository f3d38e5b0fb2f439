//! Schema engine error types.

use thiserror::Error;

use crate::record::Value;
use crate::validation::schema::FieldType;

/// Errors from schema construction and record validation.
///
/// Every validation error aborts the call it was raised in; no partial
/// record is returned.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A field declares a type outside the closed type set.
    #[error("key '{field}' declares type '{found}', type must be one of {}", FieldType::allowed())]
    InvalidSchemaType { field: String, found: String },

    /// A type name outside the closed type set, parsed without a field.
    #[error("unknown type '{found}', type must be one of {}", FieldType::allowed())]
    UnknownFieldType { found: String },

    /// The declarative schema definition is malformed.
    #[error("invalid schema definition: {0}")]
    InvalidDefinition(String),

    /// A required field resolved to absent and has no default.
    #[error("key '{field}' is of invalid type, found: '{found}', required: '{required}'")]
    MissingRequiredField {
        field: String,
        /// Kind of the raw input value before coercion.
        found: &'static str,
        required: FieldType,
    },

    /// A present field failed its custom validity check.
    #[error("key '{field}' did not pass custom valid test, '{value}'")]
    CustomValidationRejected { field: String, value: Value },

    /// A preparse hook failed.
    #[error("key '{field}' preparse failed: {source}")]
    PreparseFailed {
        field: String,
        #[source]
        source: anyhow::Error,
    },

    /// A deferred validity check was reached from the synchronous entry point.
    #[error("key '{field}' has a deferred validity check, use validate_async")]
    DeferredCheckInSyncPath { field: String },

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("record is not serializable: {0}")]
    NotSerializable(#[from] serde_json::Error),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
