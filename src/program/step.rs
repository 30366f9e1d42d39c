// src/program/step.rs

//! Step descriptors.

use std::fmt;

use crate::types::{Operation, StepName};

/// One entry of a [`Program`](super::Program).
///
/// The name is unique within a program and doubles as both the graph node
/// id and the key of the final result mapping.
#[derive(Debug, Clone)]
pub struct Step {
    pub name: StepName,
    pub kind: StepKind,
}

/// What a step resolves to at invocation time.
#[derive(Clone)]
pub enum StepKind {
    /// Positional argument supplied by the caller; settles immediately and
    /// never fails.
    Argument { index: usize },
    /// Asynchronous operation plus its resolved dependency names, in
    /// declared order.
    Operation {
        operation: Operation,
        dependencies: Vec<StepName>,
    },
}

impl fmt::Debug for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Argument { index } => {
                f.debug_struct("Argument").field("index", index).finish()
            }
            StepKind::Operation { dependencies, .. } => f
                .debug_struct("Operation")
                .field("dependencies", dependencies)
                .finish_non_exhaustive(),
        }
    }
}
