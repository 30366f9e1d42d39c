// src/exec/slot.rs

//! Write-once value slots.
//!
//! Every step of an invocation gets one slot. The owning step task writes
//! it exactly once; any number of dependents (plus the fan-in loop) wait
//! for it to settle. Single writer, multiple readers: a `tokio::sync::watch`
//! channel carries the settled outcome with no further synchronization.

use tokio::sync::watch;

use crate::errors::StepFailure;
use crate::types::{StepName, Value};

/// Settled outcome of a single step.
pub(crate) type SlotResult = std::result::Result<Value, StepFailure>;

/// Write half of a slot.
pub(crate) struct SlotWriter {
    tx: watch::Sender<Option<SlotResult>>,
}

/// Read half of a slot; cheap to clone.
#[derive(Clone)]
pub(crate) struct SlotReader {
    step: StepName,
    rx: watch::Receiver<Option<SlotResult>>,
}

pub(crate) fn slot(step: &str) -> (SlotWriter, SlotReader) {
    let (tx, rx) = watch::channel(None);
    (
        SlotWriter { tx },
        SlotReader {
            step: step.to_string(),
            rx,
        },
    )
}

impl SlotWriter {
    /// Settle the slot. Consumes the writer, enforcing write-once.
    pub(crate) fn settle(self, result: SlotResult) {
        // All readers may already be gone; that is fine.
        let _ = self.tx.send(Some(result));
    }
}

impl SlotReader {
    /// Wait until the slot has settled (successfully or not) and return
    /// its outcome.
    pub(crate) async fn settled(mut self) -> SlotResult {
        match self.rx.wait_for(Option::is_some).await {
            Ok(settled) => match settled.as_ref() {
                Some(result) => result.clone(),
                // wait_for only returns once the predicate holds.
                None => Err(StepFailure::lost(&self.step)),
            },
            // The writer was dropped without settling; only reachable if
            // the owning step task panicked.
            Err(_) => Err(StepFailure::lost(&self.step)),
        }
    }
}
