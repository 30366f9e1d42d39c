// src/lib.rs

//! Dependency-inferring asynchronous step scheduler.
//!
//! A [`Scheduler`] is built once from a [`SchedulerConfig`]: an ordered set
//! of named steps, where each step is either a positional argument or an
//! asynchronous operation whose declared dependencies name other steps.
//! The declarations form an implicit directed graph; `exec` runs every step
//! exactly once, as soon as its dependencies have settled, and returns the
//! resolved values keyed by step name in declaration order — or a single
//! normalized error identifying which step failed.
//!
//! ```
//! use stepdag::{operation, Scheduler, SchedulerConfig, Value};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> stepdag::Result<()> {
//! let config = SchedulerConfig::new()
//!     .args(["name"])
//!     .step_with_deps(
//!         "greet",
//!         ["name"],
//!         operation(|deps| async move {
//!             let who = deps[0].as_str().unwrap_or("world").to_string();
//!             Ok(Value::from(format!("hello {who}")))
//!         }),
//!     );
//!
//! let scheduler = Scheduler::new(config)?;
//! let out = scheduler.exec(vec![Value::from("dag")]).await?;
//! assert_eq!(out["greet"], Value::from("hello dag"));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod logging;
pub mod program;
pub mod scheduler;
pub mod signature;
pub mod types;

mod exec;

pub use errors::{OpError, Result, StepFailure, StepdagError};
pub use program::{Program, SchedulerConfig, Step, StepKind};
pub use scheduler::Scheduler;
pub use signature::{parse_signature, DependencySpec};
pub use types::{operation, OpFuture, OpResult, Operation, StepName, Value};
