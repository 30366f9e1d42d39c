// src/program/builder.rs

//! Configuration and program building.

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::{Result, StepdagError};
use crate::program::step::{Step, StepKind};
use crate::program::{validate, Program};
use crate::signature::DependencySpec;
use crate::types::{Operation, StepName};

/// One raw configuration entry, in declaration order.
enum ConfigEntry {
    /// Ordered positional-argument names. At most one per configuration.
    Args(Vec<StepName>),
    /// An operation step and how its dependencies are declared.
    Operation {
        name: StepName,
        operation: Operation,
        deps: DependencySpec,
    },
}

/// Ordered scheduler configuration.
///
/// Entries keep their declaration order, including the position at which
/// the argument names were declared; that order becomes the program's (and
/// hence the result mapping's) iteration order.
#[derive(Default)]
pub struct SchedulerConfig {
    entries: Vec<ConfigEntry>,
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the ordered positional-argument names.
    ///
    /// Each name becomes an Argument step resolving to the value at the
    /// same position of the invocation's argument list.
    pub fn args<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StepName>,
    {
        self.entries.push(ConfigEntry::Args(
            names.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Declare an operation step with no dependency annotation.
    ///
    /// The step is treated as a leaf with no dependencies, even if its
    /// operation was written expecting inputs; use [`step_with_deps`]
    /// (or a signature) to receive other steps' values.
    ///
    /// [`step_with_deps`]: Self::step_with_deps
    pub fn step(mut self, name: impl Into<StepName>, operation: Operation) -> Self {
        self.entries.push(ConfigEntry::Operation {
            name: name.into(),
            operation,
            deps: DependencySpec::Bare,
        });
        self
    }

    /// Declare an operation step with an explicit ordered dependency list.
    ///
    /// The operation receives the named steps' resolved values positionally
    /// in exactly this order; reordering the list reorders the call
    /// arguments.
    pub fn step_with_deps<I, S>(
        mut self,
        name: impl Into<StepName>,
        deps: I,
        operation: Operation,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StepName>,
    {
        self.entries.push(ConfigEntry::Operation {
            name: name.into(),
            operation,
            deps: DependencySpec::Explicit(deps.into_iter().map(Into::into).collect()),
        });
        self
    }

    /// Declare an operation step whose dependencies are parsed from a
    /// textual signature, e.g. `"(getA, getB)"` or `"getA =>"`.
    pub fn step_with_signature(
        mut self,
        name: impl Into<StepName>,
        signature: impl Into<String>,
        operation: Operation,
    ) -> Self {
        self.entries.push(ConfigEntry::Operation {
            name: name.into(),
            operation,
            deps: DependencySpec::Signature(signature.into()),
        });
        self
    }
}

/// Build an immutable [`Program`] from a configuration.
///
/// Synchronous and side-effect-free. Dangling dependency names are not an
/// error (they resolve to null at execution time); duplicate step names, a
/// second argument declaration, and dependency cycles fail the build.
pub(crate) fn build(config: SchedulerConfig) -> Result<Program> {
    let mut steps: IndexMap<StepName, Step> = IndexMap::new();
    let mut args_declared = false;

    for entry in config.entries {
        match entry {
            ConfigEntry::Args(names) => {
                if args_declared {
                    return Err(StepdagError::ConfigError(
                        "positional arguments declared more than once".to_string(),
                    ));
                }
                args_declared = true;

                for (index, name) in names.into_iter().enumerate() {
                    insert_unique(
                        &mut steps,
                        Step {
                            name,
                            kind: StepKind::Argument { index },
                        },
                    )?;
                }
            }
            ConfigEntry::Operation {
                name,
                operation,
                deps,
            } => {
                let dependencies = deps.resolve();
                debug!(step = %name, ?dependencies, "resolved step dependencies");
                insert_unique(
                    &mut steps,
                    Step {
                        name,
                        kind: StepKind::Operation {
                            operation,
                            dependencies,
                        },
                    },
                )?;
            }
        }
    }

    let program = Program { steps };
    validate::ensure_acyclic(&program)?;
    Ok(program)
}

fn insert_unique(steps: &mut IndexMap<StepName, Step>, step: Step) -> Result<()> {
    let name = step.name.clone();
    if steps.insert(name.clone(), step).is_some() {
        return Err(StepdagError::ConfigError(format!(
            "duplicate step name '{name}' in configuration"
        )));
    }
    Ok(())
}
