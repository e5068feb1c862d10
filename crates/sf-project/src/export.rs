//! Linearize a workflow graph back into its ordered step list.

use std::collections::HashSet;
use thiserror::Error;

use sf_graph::{FlowGraph, StepKind};

use crate::schema::StepDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("the flow needs at least one step")]
    NoSteps,

    #[error("the flow must have exactly one begin and one end step")]
    MissingEndpoints,

    #[error("the steps do not form a complete chain; check for disconnected steps")]
    IncompleteChain,
}

/// Walk forward from the begin step and emit one record per Normal-class
/// step visited, stopping at the end step or at a step with no outgoing
/// transition.
///
/// If the emitted count differs from the graph's step count the chain is
/// incomplete and no partial result is returned.
pub fn export(graph: &FlowGraph) -> Result<Vec<StepDef>, ExportError> {
    if graph.step_count() == 0 {
        return Err(ExportError::NoSteps);
    }
    if graph.count_of_kind(StepKind::Begin) != 1 || graph.count_of_kind(StepKind::End) != 1 {
        return Err(ExportError::MissingEndpoints);
    }
    let Some(begin) = graph.first_of_kind(StepKind::Begin) else {
        return Err(ExportError::MissingEndpoints);
    };

    let mut records = Vec::new();
    let mut visited = HashSet::new();
    let mut current = begin;
    loop {
        // The visited set is a guard against defective link state, not a
        // traversal aid: a healthy chain never revisits.
        if !visited.insert(current) {
            break;
        }
        let Some(node) = graph.node(current) else {
            break;
        };
        if node.kind == StepKind::End {
            break;
        }
        if node.kind.is_step() {
            records.push(StepDef::from_data(&node.data, records.len() as i32));
        }
        match node.outgoing.and_then(|e| graph.edge(e)).map(|e| e.end) {
            Some(next) => current = next,
            None => break,
        }
    }

    if records.len() != graph.step_count() {
        return Err(ExportError::IncompleteChain);
    }
    Ok(records)
}
