//! Required/default resolution.
//!
//! Decides what happens to a field once it has been coerced.

use crate::logging::structured::LogContext;
use crate::pipeline::context::ValidateOptions;
use crate::record::Value;
use crate::validation::schema::FieldDescriptor;

/// Outcome of resolving one coerced field.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Coerced value is present and kept as-is.
    Keep(Value),
    /// Field was absent and falls back to its declared default.
    Default(Value),
    /// Optional field was absent and is removed from the output.
    Remove,
    /// Required field was absent with no default to fall back to.
    Missing,
}

impl Resolution {
    pub fn as_str(&self) -> &str {
        match self {
            Resolution::Keep(_) => "keep",
            Resolution::Default(_) => "default",
            Resolution::Remove => "remove",
            Resolution::Missing => "missing",
        }
    }
}

/// Resolve a coerced field against its descriptor.
///
/// # Decision Tree
/// 1. Present -> Keep (no default, no required check)
/// 2. Absent, optional -> Default when `defaults` is set and one is declared,
///    else Remove
/// 3. Absent, required -> Default when declared, else Missing
pub fn resolve_field(
    field: &str,
    descriptor: &FieldDescriptor,
    coerced: Option<Value>,
    options: &ValidateOptions,
    ctx: &LogContext,
) -> Resolution {
    if let Some(value) = coerced {
        return Resolution::Keep(value);
    }

    let default = descriptor.default_value().cloned();

    if !descriptor.is_required() {
        return match default {
            Some(value) if options.defaults => {
                crate::log_debug!(ctx, "FIELD_DEFAULTED", field = field, required = false);
                Resolution::Default(value)
            }
            _ => {
                crate::log_debug!(ctx, "FIELD_REMOVED", field = field);
                Resolution::Remove
            }
        };
    }

    match default {
        Some(value) => {
            crate::log_debug!(ctx, "FIELD_DEFAULTED", field = field, required = true);
            Resolution::Default(value)
        }
        None => {
            crate::log_warn!(
                ctx,
                "REQUIRED_MISSING",
                field = field,
                required_type = descriptor.field_type().as_str()
            );
            Resolution::Missing
        }
    }
}
