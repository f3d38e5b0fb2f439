//! Field stripping and coercion.
//!
//! - `strip_record` keeps only the keys a schema declares
//! - `coerce_field` runs preparse, the type parser, and postparse for one field

pub mod parsers;

pub use parsers::*;

use crate::error::{SchemaError, SchemaResult};
use crate::logging::structured::LogContext;
use crate::record::{Record, Value};
use crate::validation::schema::{FieldDescriptor, Schema};

/// Copy of `record` restricted to schema keys.
///
/// The caller's record is only borrowed; every retained value is cloned.
pub fn strip_record(schema: &Schema, record: &Record, ctx: &LogContext) -> Record {
    let stripped: Record = record
        .iter()
        .filter(|(key, _)| schema.contains(key))
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();

    let dropped = record.len() - stripped.len();
    if dropped > 0 {
        crate::log_debug!(ctx, "FIELD_STRIPPED", count = dropped);
    }

    stripped
}

/// Coerce one field value.
///
/// A failing preparse aborts the call. A failing postparse leaves the field
/// absent.
pub fn coerce_field(
    field: &str,
    descriptor: &FieldDescriptor,
    raw: Option<Value>,
    ctx: &LogContext,
) -> SchemaResult<Option<Value>> {
    let mut value = raw;

    if let Some(hook) = descriptor.preparse_hook() {
        if let Some(v) = value.take() {
            value = Some(hook.apply(v).map_err(|source| {
                crate::log_warn!(
                    ctx,
                    "PREPARSE_FAILED",
                    field = field,
                    error = source.to_string()
                );
                SchemaError::PreparseFailed {
                    field: field.to_string(),
                    source,
                }
            })?);
        }
    }

    let parse = parser_for(descriptor.field_type());
    value = parse(value);

    if let Some(hook) = descriptor.postparse_hook() {
        if let Some(v) = value.take() {
            value = match hook.apply(v) {
                Ok(v) => Some(v),
                Err(e) => {
                    crate::log_warn!(ctx, "POSTPARSE_FAILED", field = field, error = e.to_string());
                    None
                }
            };
        }
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::schema::FieldType;
    use serde_json::json;

    fn ctx() -> LogContext {
        LogContext::new("test-schema")
    }

    #[test]
    fn test_strip_drops_unknown_keys() {
        let schema = Schema::new().field("field", FieldDescriptor::new(FieldType::Boolean));
        let record = Record::from_json(json!({"foo": "bar", "field": "y"})).unwrap();

        let stripped = strip_record(&schema, &record, &ctx());
        assert_eq!(stripped, Record::new().with("field", "y"));
        // Caller's record untouched
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_preparse_then_parse() {
        let descriptor = FieldDescriptor::new(FieldType::String)
            .preparse(|v| Ok(Value::from(v.to_string().trim())));
        let out = coerce_field("f", &descriptor, Some(Value::from(" a ")), &ctx()).unwrap();
        assert_eq!(out, Some(Value::from("a")));
    }

    #[test]
    fn test_preparse_skipped_when_absent() {
        let descriptor =
            FieldDescriptor::new(FieldType::String).preparse(|_| Err(anyhow::anyhow!("called")));
        assert_eq!(coerce_field("f", &descriptor, None, &ctx()).unwrap(), None);
    }

    #[test]
    fn test_preparse_failure_is_fatal() {
        let descriptor =
            FieldDescriptor::new(FieldType::String).preparse(|_| Err(anyhow::anyhow!("bad input")));
        let err = coerce_field("f", &descriptor, Some(Value::from("x")), &ctx()).unwrap_err();
        assert!(matches!(err, SchemaError::PreparseFailed { ref field, .. } if field == "f"));
    }

    #[test]
    fn test_postparse_failure_is_absent() {
        let descriptor =
            FieldDescriptor::new(FieldType::Number).postparse(|_| Err(anyhow::anyhow!("bad")));
        assert_eq!(
            coerce_field("f", &descriptor, Some(Value::from(1.5)), &ctx()).unwrap(),
            None
        );
    }

    #[test]
    fn test_postparse_skipped_when_unparseable() {
        let descriptor =
            FieldDescriptor::new(FieldType::Number).postparse(|_| Ok(Value::from(0)));
        assert_eq!(
            coerce_field("f", &descriptor, Some(Value::from("a")), &ctx()).unwrap(),
            None
        );
    }
}
