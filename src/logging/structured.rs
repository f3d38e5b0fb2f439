//! Structured logging utilities.
//!
//! Provides context-aware logging with the schema name and call id included
//! in every log message.

use std::fmt;

/// Logging context for one schema engine, optionally scoped to one call.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub schema: String,
    pub call_id: Option<String>,
}

impl LogContext {
    pub fn new(schema: &str) -> Self {
        Self {
            schema: schema.to_string(),
            call_id: None,
        }
    }

    pub fn with_call(&self, call_id: &str) -> Self {
        Self {
            schema: self.schema.clone(),
            call_id: Some(call_id.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.call_id {
            Some(cid) => write!(f, "[schema={}] [call={}]", self.schema, cid),
            None => write!(f, "[schema={}]", self.schema),
        }
    }
}

/// Log one `EVENT key=value ...` line at `level`, prefixed by a context.
///
/// Values are rendered with `Debug`, so strings come out quoted.
#[doc(hidden)]
#[macro_export]
macro_rules! log_event {
    ($level:ident, $ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        ::log::$level!(
            "{} {}{}",
            $ctx,
            $event,
            format_args!(concat!($(" ", stringify!($key), "={:?}"),*), $($value),*)
        )
    };
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => { $crate::log_event!(info, $($arg)+) };
}

/// Log a warning with context.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => { $crate::log_event!(warn, $($arg)+) };
}

/// Log an error with context.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => { $crate::log_event!(error, $($arg)+) };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => { $crate::log_event!(debug, $($arg)+) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext::new("users");
        assert_eq!(format!("{}", ctx), "[schema=users]");

        let ctx_with_call = ctx.with_call("call-456");
        assert_eq!(
            format!("{}", ctx_with_call),
            "[schema=users] [call=call-456]"
        );
    }

    #[test]
    fn test_macros_expand() {
        let ctx = LogContext::new("users").with_call("call-1");
        crate::log_info!(ctx, "EVENT");
        crate::log_debug!(ctx, "EVENT", field = "a");
        crate::log_warn!(ctx, "EVENT", field = "a", count = 2);
        crate::log_error!(ctx, "EVENT", field = "a", count = 2,);
        crate::log_warn!(&ctx, "EVENT", field = "a", error = String::from("boom"));
        crate::log_debug!(&ctx, "EVENT", field = "a", required = false);
    }
}
