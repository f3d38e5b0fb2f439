//! Per-field processing hooks.
//!
//! Hooks are plain closures attached to a field descriptor: transforms run
//! around type coercion, checks decide whether a resolved value is valid.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::record::Value;

/// Boxed boolean verdict from a deferred check.
pub type DeferredVerdict = Pin<Box<dyn Future<Output = bool> + Send>>;

type TransformFn = dyn Fn(Value) -> anyhow::Result<Value> + Send + Sync;
type ImmediateFn = dyn Fn(&Value) -> bool + Send + Sync;
type DeferredFn = dyn Fn(Value) -> DeferredVerdict + Send + Sync;

/// A value → value hook (`preparse` / `postparse`).
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, value: Value) -> anyhow::Result<Value> {
        (self.0)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform")
    }
}

/// A custom validity check (`valid`).
#[derive(Clone)]
pub enum Check {
    /// Answers synchronously. Usable from both entry points.
    Immediate(Arc<ImmediateFn>),
    /// Answers with a future. Only usable from `validate_async`.
    Deferred(Arc<DeferredFn>),
}

impl Check {
    pub fn immediate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Check::Immediate(Arc::new(f))
    }

    pub fn deferred<F, Fut>(f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Check::Deferred(Arc::new(move |value| -> DeferredVerdict { Box::pin(f(value)) }))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Check::Deferred(_))
    }

    /// Run the check, suspending on deferred verdicts.
    pub async fn run(&self, value: &Value) -> bool {
        match self {
            Check::Immediate(f) => f(value),
            Check::Deferred(f) => f(value.clone()).await,
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Immediate(_) => f.write_str("Check::Immediate"),
            Check::Deferred(_) => f.write_str("Check::Deferred"),
        }
    }
}
