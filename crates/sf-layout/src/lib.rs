//! Deterministic zigzag placement for workflow graphs.
//!
//! Steps are laid out left to right, two step-widths apart; when the next
//! slot would leave the canvas the walk drops a row and reverses direction,
//! producing the boustrophedon shape the editor renders after a load.

use std::collections::HashSet;

use sf_core::{NodeId, Point};
use sf_graph::{FlowGraph, StepKind};

/// Place every node in chain order starting from the begin step at (0, 0).
///
/// The walk follows outgoing transitions; when a node has no outgoing edge
/// the walk resumes at an unplaced Normal-class step with no incoming edge,
/// so partially connected chains still make forward progress. A disconnected
/// end step is placed last, off the final placed node. Edges incident to
/// each placed node are re-clipped so connectors stay attached.
///
/// All placement state lives in the call; invoking this twice from the same
/// graph state yields identical positions.
pub fn auto_layout(graph: &mut FlowGraph, canvas_width: i32) {
    let Some(begin) = graph.first_of_kind(StepKind::Begin) else {
        return;
    };
    let _ = graph.set_origin(begin, Point::new(0, 0));
    let _ = graph.reposition_incident(begin);

    let mut placed = HashSet::new();
    placed.insert(begin);
    let mut leftward = false;
    let mut prev = begin;

    // Bounded by the node count; a defective link table cannot loop forever
    // because every iteration places a node never placed before.
    while placed.len() < graph.node_count() {
        let Some(next) = next_unplaced(graph, prev, &placed) else {
            break;
        };
        place_after(graph, prev, next, canvas_width, &mut leftward);
        placed.insert(next);
        prev = next;
    }

    if let Some(end) = graph.first_of_kind(StepKind::End) {
        let disconnected = !placed.contains(&end)
            && graph.node(end).is_some_and(|n| n.incoming.is_none());
        if disconnected {
            tracing::debug!(?end, "placing disconnected end step");
            place_after(graph, prev, end, canvas_width, &mut leftward);
        }
    }
}

/// The successor of `prev`, or a fresh chain head when `prev` is a dead end.
fn next_unplaced(graph: &FlowGraph, prev: NodeId, placed: &HashSet<NodeId>) -> Option<NodeId> {
    let successor = graph
        .node(prev)
        .and_then(|n| n.outgoing)
        .and_then(|e| graph.edge(e))
        .map(|e| e.end)
        .filter(|id| !placed.contains(id));
    successor.or_else(|| {
        graph
            .nodes()
            .find(|n| n.kind.is_step() && n.incoming.is_none() && !placed.contains(&n.id))
            .map(|n| n.id)
    })
}

/// Zigzag step: two widths over, or a flip plus a row drop when the
/// candidate leaves `[0, canvas_width - width]`.
fn place_after(
    graph: &mut FlowGraph,
    prev_id: NodeId,
    node_id: NodeId,
    canvas_width: i32,
    leftward: &mut bool,
) {
    let Some(prev) = graph.node(prev_id) else {
        return;
    };
    let (width, height) = (prev.size.width, prev.size.height);
    let mut x = if *leftward {
        prev.pos.x - width * 2
    } else {
        prev.pos.x + width * 2
    };
    let mut y = prev.pos.y;
    if (*leftward && x < 0) || (!*leftward && x > canvas_width - width) {
        *leftward = !*leftward;
        x = if *leftward { prev.pos.x } else { 0 };
        y += height * 3 / 2;
    }
    let _ = graph.set_origin(node_id, Point::new(x, y));
    let _ = graph.reposition_incident(node_id);
}
