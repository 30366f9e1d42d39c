// src/exec/executor.rs

//! Fan-out / fan-in driver for one invocation.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::errors::StepFailure;
use crate::exec::aggregate::map_results;
use crate::exec::slot::{slot, SlotReader, SlotWriter};
use crate::program::{Program, StepKind};
use crate::types::{Operation, StepName, Value};

/// Run one invocation of `program` with the given positional values.
///
/// Every slot is created and indexed before any operation task is spawned,
/// so a fast-settling leaf can never be looked up before it exists. The
/// invocation waits for every slot to settle before returning; on failure
/// it surfaces exactly one [`StepFailure`]: the first step-level failure in
/// settlement order, not declaration order. Each failing step task pushes
/// its failure onto `fail_tx` immediately before settling its slot, so the
/// channel's first message is the first failure to settle.
pub(crate) async fn run(
    program: &Program,
    args: Vec<Value>,
) -> std::result::Result<IndexMap<StepName, Value>, StepFailure> {
    let mut writers: Vec<SlotWriter> = Vec::with_capacity(program.len());
    let mut readers: IndexMap<StepName, SlotReader> = IndexMap::with_capacity(program.len());

    for step in program.steps() {
        let (tx, rx) = slot(&step.name);
        writers.push(tx);
        readers.insert(step.name.clone(), rx);
    }

    let (fail_tx, mut fail_rx) = mpsc::unbounded_channel::<StepFailure>();

    for (step, writer) in program.steps().zip(writers) {
        match &step.kind {
            StepKind::Argument { index } => {
                // Argument steps settle synchronously and never fail. A
                // shortfall of caller-supplied values yields null.
                let value = args.get(*index).cloned().unwrap_or(Value::Null);
                writer.settle(Ok(value));
            }
            StepKind::Operation {
                operation,
                dependencies,
            } => {
                // A dependency name with no matching step has no slot and
                // resolves to null.
                let deps: Vec<(StepName, Option<SlotReader>)> = dependencies
                    .iter()
                    .map(|dep| (dep.clone(), readers.get(dep).cloned()))
                    .collect();

                tokio::spawn(run_step(
                    step.name.clone(),
                    Arc::clone(operation),
                    deps,
                    writer,
                    fail_tx.clone(),
                ));
            }
        }
    }
    drop(fail_tx);

    // Fan-in: every slot must settle before anything is reported, so a
    // sibling running after the first failure still runs to completion.
    let mut values = Vec::with_capacity(program.len());
    let mut lost_failure: Option<StepFailure> = None;

    for (name, reader) in readers {
        match reader.settled().await {
            Ok(value) => values.push(value),
            Err(failure) => {
                debug!(step = %name, origin = %failure.step, "step settled with failure");
                if lost_failure.is_none() {
                    lost_failure = Some(failure);
                }
                values.push(Value::Null);
            }
        }
    }

    if let Some(lost) = lost_failure {
        // First-settled failure wins. A failing task always sends before it
        // settles, so by now the channel holds every failure in settlement
        // order. The fallback only covers a slot lost to a panicked task,
        // which settles nothing and sends nothing.
        let failure = fail_rx.recv().await.unwrap_or(lost);
        return Err(failure);
    }

    Ok(map_results(program, values))
}

/// Drive a single operation step.
///
/// Waits for every declared dependency to settle, in declared order. A
/// failed dependency poisons the step: the upstream failure is adopted
/// unchanged (so the originating step's tag survives) and the operation is
/// skipped. Otherwise the operation is invoked with the dependency values
/// positionally, and its own failure is normalized under this step's name.
///
/// Failures are announced on `fail_tx` before the slot settles, which is
/// what gives the executor its settlement-order failure reporting.
async fn run_step(
    name: StepName,
    operation: Operation,
    deps: Vec<(StepName, Option<SlotReader>)>,
    writer: SlotWriter,
    fail_tx: mpsc::UnboundedSender<StepFailure>,
) {
    let mut resolved = Vec::with_capacity(deps.len());
    let mut upstream: Option<StepFailure> = None;

    for (dep, reader) in deps {
        let outcome = match reader {
            Some(reader) => reader.settled().await,
            None => {
                debug!(step = %name, dep = %dep, "dependency matches no step; resolving null");
                Ok(Value::Null)
            }
        };
        match outcome {
            Ok(value) => resolved.push(value),
            Err(failure) => {
                if upstream.is_none() {
                    upstream = Some(failure);
                }
                resolved.push(Value::Null);
            }
        }
    }

    if let Some(failure) = upstream {
        debug!(step = %name, origin = %failure.step, "adopting upstream failure");
        // The origin already announced itself before settling, so this
        // re-announcement can never displace it from the front.
        let _ = fail_tx.send(failure.clone());
        writer.settle(Err(failure));
        return;
    }

    debug!(step = %name, deps = resolved.len(), "invoking step operation");
    match operation(resolved).await {
        Ok(value) => writer.settle(Ok(value)),
        Err(err) => {
            let failure = StepFailure::normalize(&name, err);
            warn!(step = %name, message = %failure.message, "step operation failed");
            let _ = fail_tx.send(failure.clone());
            writer.settle(Err(failure));
        }
    }
}
