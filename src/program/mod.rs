// src/program/mod.rs

//! Program construction.
//!
//! - [`step`] defines the [`Step`] descriptors a program is made of.
//! - [`builder`] turns a [`SchedulerConfig`] into a [`Program`].
//! - [`validate`] holds the build-time cycle check.

pub mod builder;
pub mod step;
pub mod validate;

use indexmap::IndexMap;

use crate::types::StepName;

pub use builder::SchedulerConfig;
pub use step::{Step, StepKind};

/// Immutable, insertion-ordered mapping from step name to [`Step`].
///
/// Built once per scheduler. Iteration order is the configuration's
/// declaration order and determines the key order of the final result
/// mapping, not execution order (which is dependency-driven).
#[derive(Debug)]
pub struct Program {
    steps: IndexMap<StepName, Step>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }

    /// Steps in declaration order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.values()
    }

    pub fn get(&self, name: &str) -> Option<&Step> {
        self.steps.get(name)
    }
}
