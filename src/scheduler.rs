// src/scheduler.rs

//! Public scheduler entry point.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::Result;
use crate::exec;
use crate::program::{self, Program, SchedulerConfig};
use crate::types::{StepName, Value};

/// An immutable, reusable scheduler for one configuration.
///
/// Building resolves every step's dependencies and validates the graph
/// (cycles fail fast). `exec` may then be called any number of times; each
/// call gets fresh per-invocation state, so concurrent invocations do not
/// interfere.
#[derive(Debug, Clone)]
pub struct Scheduler {
    program: Arc<Program>,
}

impl Scheduler {
    /// Build a scheduler from a configuration.
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        let program = program::builder::build(config)?;
        debug!(steps = program.len(), "program built");
        Ok(Self {
            program: Arc::new(program),
        })
    }

    /// Execute every step exactly once, honoring the dependency graph.
    ///
    /// `args` supplies the positional values for the declared argument
    /// names; excess values are ignored and missing ones resolve to null.
    /// On success, returns the step values keyed by name in declaration
    /// order. On failure, exactly one normalized step error is returned,
    /// tagged with the originating step.
    pub async fn exec(&self, args: Vec<Value>) -> Result<IndexMap<StepName, Value>> {
        Ok(exec::run(&self.program, args).await?)
    }

    /// Step names in declaration order.
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.program.names()
    }
}
