//! The schema engine.
//!
//! Coordinates the per-call workflow:
//! 1. Strip undeclared fields
//! 2. Coerce each declared field (preparse, type parser, postparse)
//! 3. Resolve required/default policy
//! 4. Run custom checks with the reject policy
//!
//! Steps 1-3 are shared by both entry points. Only step 4 differs:
//! `validate` requires immediate checks, `validate_async` awaits deferred
//! ones, one field at a time in schema order.

use crate::coercion::{coerce_field, strip_record};
use crate::error::{SchemaError, SchemaResult};
use crate::logging::structured::LogContext;
use crate::policy::{decide_on_verdict, resolve_field, RejectDecision, Resolution};
use crate::record::{Record, Value, MISSING_KIND};
use crate::validation::hooks::Check;
use crate::validation::schema::{FieldDescriptor, Schema};

use super::context::{CallContext, ValidateOptions};

const ANONYMOUS: &str = "anonymous";

/// Validates and coerces records against one immutable schema.
///
/// Holds no per-call state; one engine can serve any number of concurrent
/// calls.
#[derive(Debug, Clone)]
pub struct SchemaEngine {
    name: String,
    schema: Schema,
}

impl SchemaEngine {
    pub fn new(schema: Schema) -> Self {
        Self {
            name: ANONYMOUS.to_string(),
            schema,
        }
    }

    /// Name used in log context.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Build an engine from a JSON object of field specs.
    ///
    /// # Errors
    /// `InvalidSchemaType` or `InvalidDefinition`; no engine is produced.
    pub fn from_definition(definition: &serde_json::Value) -> SchemaResult<Self> {
        Ok(Self::new(Schema::from_definition(definition)?))
    }

    /// Build an engine from JSON text.
    pub fn from_json_str(definition: &str) -> SchemaResult<Self> {
        let json: serde_json::Value = serde_json::from_str(definition)
            .map_err(|e| SchemaError::InvalidDefinition(e.to_string()))?;
        Self::from_definition(&json)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate a record with immediate custom checks.
    ///
    /// # Errors
    /// - `MissingRequiredField`, `CustomValidationRejected`, `PreparseFailed`
    /// - `DeferredCheckInSyncPath` if a present field has a deferred check
    pub fn validate(&self, record: &Record, options: &ValidateOptions) -> SchemaResult<Record> {
        let call = CallContext::new(&self.name);
        let ctx = call.log_context();

        let mut output = self.resolve(record, options, &ctx)?;

        for (field, descriptor, check) in self.pending_checks(&output) {
            let Check::Immediate(f) = check else {
                crate::log_error!(ctx, "DEFERRED_CHECK_IN_SYNC_PATH", field = field);
                return Err(SchemaError::DeferredCheckInSyncPath {
                    field: field.to_string(),
                });
            };
            let passed = output.get(field).is_some_and(|value| f(value));
            apply_verdict(field, descriptor, passed, &mut output, options, &ctx)?;
        }

        crate::log_debug!(ctx, "VALIDATE_COMPLETE", fields = output.len());
        Ok(output)
    }

    /// Validate a record, awaiting deferred custom checks.
    ///
    /// Same semantics as `validate`; each deferred verdict is resolved before
    /// the next field's check starts.
    pub async fn validate_async(
        &self,
        record: &Record,
        options: &ValidateOptions,
    ) -> SchemaResult<Record> {
        let call = CallContext::new(&self.name);
        let ctx = call.log_context();

        let mut output = self.resolve(record, options, &ctx)?;

        for (field, descriptor, check) in self.pending_checks(&output) {
            let passed = match output.get(field) {
                Some(value) => check.run(value).await,
                None => continue,
            };
            apply_verdict(field, descriptor, passed, &mut output, options, &ctx)?;
        }

        crate::log_debug!(ctx, "VALIDATE_COMPLETE", fields = output.len());
        Ok(output)
    }

    /// `validate` over JSON objects.
    pub fn validate_json(
        &self,
        json: &serde_json::Value,
        options: &ValidateOptions,
    ) -> SchemaResult<serde_json::Value> {
        let record = Record::from_json(json.clone())?;
        self.validate(&record, options)?.to_json()
    }

    /// `validate_async` over JSON objects.
    pub async fn validate_json_async(
        &self,
        json: &serde_json::Value,
        options: &ValidateOptions,
    ) -> SchemaResult<serde_json::Value> {
        let record = Record::from_json(json.clone())?;
        self.validate_async(&record, options).await?.to_json()
    }

    /// Strip, coerce and resolve every schema field.
    fn resolve(
        &self,
        record: &Record,
        options: &ValidateOptions,
        ctx: &LogContext,
    ) -> SchemaResult<Record> {
        crate::log_debug!(
            ctx,
            "VALIDATE_START",
            fields = record.len(),
            defaults = options.defaults,
            default_on_reject = options.default_on_reject
        );

        let mut stripped = strip_record(&self.schema, record, ctx);
        let mut output = Record::new();

        for (field, descriptor) in self.schema.iter() {
            let raw = stripped.remove(field);
            let found = raw.as_ref().map_or(MISSING_KIND, Value::kind);
            let coerced = coerce_field(field, descriptor, raw, ctx)?;

            match resolve_field(field, descriptor, coerced, options, ctx) {
                Resolution::Keep(value) | Resolution::Default(value) => {
                    output.insert(field, value);
                }
                Resolution::Remove => {}
                Resolution::Missing => {
                    return Err(SchemaError::MissingRequiredField {
                        field: field.to_string(),
                        found,
                        required: descriptor.field_type(),
                    });
                }
            }
        }

        Ok(output)
    }

    /// Fields present in `output` that declare a custom check, in schema
    /// order. Absent fields are never checked.
    fn pending_checks(&self, output: &Record) -> Vec<(&str, &FieldDescriptor, &Check)> {
        self.schema
            .iter()
            .filter(|(field, _)| output.contains_key(field))
            .filter_map(|(field, descriptor)| {
                descriptor.check().map(|check| (field, descriptor, check))
            })
            .collect()
    }
}

/// Apply the reject policy to one verdict, updating `output` in place.
fn apply_verdict(
    field: &str,
    descriptor: &FieldDescriptor,
    passed: bool,
    output: &mut Record,
    options: &ValidateOptions,
    ctx: &LogContext,
) -> SchemaResult<()> {
    match decide_on_verdict(field, descriptor, passed, options, ctx) {
        RejectDecision::Accept => Ok(()),
        RejectDecision::Substitute(default) => {
            output.insert(field, default);
            Ok(())
        }
        RejectDecision::Fail => Err(SchemaError::CustomValidationRejected {
            field: field.to_string(),
            value: output.remove(field).unwrap_or(Value::Null),
        }),
    }
}
