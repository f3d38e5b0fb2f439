//! Reject policy.
//!
//! Decides what happens to a present field after its custom check ran.

use crate::logging::structured::LogContext;
use crate::pipeline::context::ValidateOptions;
use crate::record::Value;
use crate::validation::schema::FieldDescriptor;

/// Outcome of a custom check verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectDecision {
    Accept,
    /// Replace the rejected value with the declared default. The default is
    /// not checked again.
    Substitute(Value),
    Fail,
}

impl RejectDecision {
    pub fn as_str(&self) -> &str {
        match self {
            RejectDecision::Accept => "accept",
            RejectDecision::Substitute(_) => "substitute",
            RejectDecision::Fail => "fail",
        }
    }
}

/// Apply the reject policy to a check verdict.
pub fn decide_on_verdict(
    field: &str,
    descriptor: &FieldDescriptor,
    passed: bool,
    options: &ValidateOptions,
    ctx: &LogContext,
) -> RejectDecision {
    if passed {
        return RejectDecision::Accept;
    }

    match descriptor.default_value() {
        Some(default) if options.default_on_reject => {
            crate::log_info!(ctx, "CHECK_DEFAULTED", field = field);
            RejectDecision::Substitute(default.clone())
        }
        _ => {
            crate::log_warn!(ctx, "CHECK_REJECTED", field = field);
            RejectDecision::Fail
        }
    }
}
