// src/exec/aggregate.rs

//! Result aggregation.

use indexmap::IndexMap;

use crate::program::Program;
use crate::types::{StepName, Value};

/// Zip the settled values back onto the program's ordered step names.
///
/// No reordering happens here; `values` is expected to hold exactly one
/// entry per step, which the executor guarantees by settling every slot
/// before aggregating.
pub(crate) fn map_results(program: &Program, values: Vec<Value>) -> IndexMap<StepName, Value> {
    program
        .names()
        .map(str::to_string)
        .zip(values)
        .collect()
}
