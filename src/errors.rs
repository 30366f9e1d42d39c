// src/errors.rs

//! Crate-wide error types.
//!
//! Two layers of failure exist:
//! - [`OpError`] is what an operation itself can fail with (a controlled
//!   rejection carrying an arbitrary value, or a native error).
//! - [`StepFailure`] is the normalized form surfaced to callers: the raw
//!   failure decorated with the name of the step it originated in.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::types::Value;

#[derive(Error, Debug)]
pub enum StepdagError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("cycle detected in step graph: {0}")]
    Cycle(String),

    #[error(transparent)]
    Step(#[from] StepFailure),
}

pub type Result<T> = std::result::Result<T, StepdagError>;

/// Failure value produced by an operation, before normalization.
#[derive(Debug)]
pub enum OpError {
    /// Controlled rejection carrying an arbitrary value.
    Rejected(Value),
    /// A native error, either returned directly or propagated with `?`.
    Failure(anyhow::Error),
}

impl OpError {
    /// Reject with an arbitrary value.
    pub fn reject(reason: impl Into<Value>) -> Self {
        OpError::Rejected(reason.into())
    }

    /// Fail with a native error.
    pub fn failure(err: impl Into<anyhow::Error>) -> Self {
        OpError::Failure(err.into())
    }
}

impl From<anyhow::Error> for OpError {
    fn from(err: anyhow::Error) -> Self {
        OpError::Failure(err)
    }
}

/// Normalized step failure: the single error surfaced for a failed
/// invocation.
///
/// Normalization happens exactly once, at the step whose operation actually
/// failed. Steps that merely depend on a failed step adopt the upstream
/// `StepFailure` unchanged, so `step` always names the originating step.
#[derive(Debug, Clone)]
pub struct StepFailure {
    /// Name of the step whose operation failed.
    pub step: String,
    /// The rejection value if it was a string, the native error's message,
    /// or empty for a non-string rejection value.
    pub message: String,
    /// Original rejection value; `Null` when the failure was a native error.
    pub reason: Value,
    source: Option<Arc<anyhow::Error>>,
}

impl StepFailure {
    /// Normalize a raw operation failure, tagging it with the originating
    /// step's name.
    pub(crate) fn normalize(step: &str, err: OpError) -> Self {
        match err {
            OpError::Rejected(value) => {
                let message = match &value {
                    Value::String(s) => s.clone(),
                    _ => String::new(),
                };
                Self {
                    step: step.to_string(),
                    message,
                    reason: value,
                    source: None,
                }
            }
            OpError::Failure(err) => Self {
                step: step.to_string(),
                message: err.to_string(),
                reason: Value::Null,
                source: Some(Arc::new(err)),
            },
        }
    }

    /// Failure for a slot whose task terminated without settling it.
    ///
    /// Only reachable if an operation task panics.
    pub(crate) fn lost(step: &str) -> Self {
        Self {
            step: step.to_string(),
            message: format!("step '{step}' terminated without settling its slot"),
            reason: Value::Null,
            source: None,
        }
    }

    /// `true` if this failure came from a controlled rejection rather than
    /// a native error.
    pub fn is_rejection(&self) -> bool {
        self.source.is_none()
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step '{}' failed: {}", self.step, self.message)
    }
}

impl std::error::Error for StepFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| AsRef::<dyn std::error::Error + 'static>::as_ref(err.as_ref()))
    }
}
