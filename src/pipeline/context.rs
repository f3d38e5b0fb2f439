//! Per-call context.
//!
//! Options for a validate call and the call id used to tag its logs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Options for one validate call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateOptions {
    /// Fill declared defaults for absent optional fields.
    pub defaults: bool,
    /// Substitute the declared default when a custom check rejects a value.
    pub default_on_reject: bool,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(mut self) -> Self {
        self.defaults = true;
        self
    }

    pub fn with_default_on_reject(mut self) -> Self {
        self.default_on_reject = true;
        self
    }
}

/// Context for one validate call.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub call_id: String,
    pub schema: String,
}

impl CallContext {
    pub fn new(schema: &str) -> Self {
        let call_id = format!("call-{}", &Uuid::new_v4().to_string()[..8]);

        Self {
            call_id,
            schema: schema.to_string(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.schema).with_call(&self.call_id)
    }
}
