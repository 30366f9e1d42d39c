// src/types.rs

//! Shared type aliases and the operation constructor.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::OpError;

/// Canonical step name type used throughout the crate.
pub type StepName = String;

/// Dynamic value exchanged between steps.
///
/// Arguments the caller did not supply and dependency names that match no
/// step both resolve to `Value::Null`.
pub type Value = serde_json::Value;

/// Result of invoking an operation.
pub type OpResult = std::result::Result<Value, OpError>;

/// Boxed future returned by an operation.
pub type OpFuture = Pin<Box<dyn Future<Output = OpResult> + Send>>;

/// An opaque asynchronous operation.
///
/// Receives its dependencies' resolved values positionally, in the order
/// the dependencies were declared, and produces a value or an [`OpError`].
pub type Operation = Arc<dyn Fn(Vec<Value>) -> OpFuture + Send + Sync>;

/// Wrap an async closure as an [`Operation`].
pub fn operation<F, Fut>(f: F) -> Operation
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = OpResult> + Send + 'static,
{
    Arc::new(move |deps| -> OpFuture { Box::pin(f(deps)) })
}
