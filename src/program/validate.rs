// src/program/validate.rs

//! Build-time validation of the dependency graph.

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{Result, StepdagError};
use crate::program::step::StepKind;
use crate::program::Program;

/// Fail fast on cyclic dependency declarations.
///
/// The execution engine would otherwise deadlock on a cycle: every step in
/// it waits forever for the others to settle. Dependency names that match
/// no step are deliberately not edges here; they resolve to null at
/// execution time and cannot form a cycle.
pub(crate) fn ensure_acyclic(program: &Program) -> Result<()> {
    // Edge direction: dependency -> dependent.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in program.names() {
        graph.add_node(name);
    }

    for step in program.steps() {
        if let StepKind::Operation { dependencies, .. } = &step.kind {
            for dep in dependencies {
                if dep == &step.name {
                    return Err(StepdagError::Cycle(format!(
                        "step '{}' depends on itself",
                        step.name
                    )));
                }
                if program.get(dep).is_some() {
                    graph.add_edge(dep.as_str(), step.name.as_str(), ());
                }
            }
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(StepdagError::Cycle(format!(
            "dependency cycle involving step '{}'",
            cycle.node_id()
        ))),
    }
}
