//! Graph operations: connect, disconnect, remove, move, reposition.
//!
//! Every operation validates before mutating; on refusal the graph is left
//! exactly as it was. Traversals are iterative with an explicit visited set
//! so a defect in the stored links can never recurse unboundedly.

use std::collections::HashSet;

use sf_core::{EdgeId, NodeId, Point, Size, clip_to_border};

use crate::error::{ConnectError, GraphError};
use crate::graph::{Edge, FlowGraph, LineStyle, StepKind};

impl FlowGraph {
    /// Connect `start` to `end` with a solid line and no current-step marker.
    ///
    /// See [`FlowGraph::connect_styled`] for the full rules.
    pub fn connect(
        &mut self,
        start: NodeId,
        end: NodeId,
    ) -> Result<Option<EdgeId>, ConnectError> {
        self.connect_styled(start, end, LineStyle::Solid, None)
    }

    /// Connect `start` to `end`, validating the chain invariants.
    ///
    /// Returns `Ok(Some(_))` with the new transition's handle on success and
    /// `Ok(None)` for the silent no-op cases: self-connection, unknown
    /// endpoints, and a pair that is already directly related.
    ///
    /// A dashed connection marks the target Gray unless it is terminal, and
    /// marks the source Current when its external id equals `current_step`.
    pub fn connect_styled(
        &mut self,
        start: NodeId,
        end: NodeId,
        style: LineStyle,
        current_step: Option<&str>,
    ) -> Result<Option<EdgeId>, ConnectError> {
        if start == end {
            return Ok(None);
        }
        let (Some(start_node), Some(end_node)) = (self.node(start), self.node(end)) else {
            return Ok(None);
        };

        if start_node.kind == StepKind::End {
            return Err(ConnectError::SourceIsTerminal);
        }
        if start_node.outgoing.is_some() {
            return Err(ConnectError::SourceAlreadyHasOutgoing);
        }
        if end_node.kind == StepKind::Begin {
            return Err(ConnectError::TargetIsInitial);
        }
        if end_node.incoming.is_some() {
            return Err(ConnectError::TargetAlreadyHasIncoming);
        }
        if self.is_related(start, end) {
            return Ok(None);
        }
        if self.reaches(end, start) {
            return Err(ConnectError::WouldCreateCycle);
        }

        let id = EdgeId::from_index(self.edges.len() as u32);
        let (start_point, end_point) = self.clipped_endpoints(start, end);
        self.edges.push(Some(Edge {
            id,
            start,
            end,
            style,
            selected: false,
            start_point,
            end_point,
        }));

        // The unwraps above were checked; re-borrow mutably to wire up.
        if let Some(node) = self.node_mut(start) {
            node.outgoing = Some(id);
        }
        if let Some(node) = self.node_mut(end) {
            node.incoming = Some(id);
        }

        if style == LineStyle::Dashed {
            if let Some(node) = self.node_mut(end) {
                if !node.kind.is_terminal() {
                    node.kind = StepKind::Gray;
                }
            }
            if let Some(node) = self.node_mut(start) {
                if current_step.is_some_and(|cur| cur == node.data.id) {
                    node.kind = StepKind::Current;
                }
            }
        }

        Ok(Some(id))
    }

    /// Remove a transition, clearing the endpoint references on both steps.
    pub fn disconnect(&mut self, edge_id: EdgeId) -> Result<(), GraphError> {
        let edge = self.edge(edge_id).ok_or(GraphError::UnknownEdge(edge_id))?;
        let (start, end) = (edge.start, edge.end);
        if let Some(node) = self.node_mut(start) {
            node.outgoing = None;
        }
        if let Some(node) = self.node_mut(end) {
            node.incoming = None;
        }
        self.edges[edge_id.index() as usize] = None;
        Ok(())
    }

    /// Remove a Normal-class step together with both incident transitions.
    ///
    /// Begin/end steps are never deleted through this path.
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let node = self.node(node_id).ok_or(GraphError::UnknownNode(node_id))?;
        if node.kind.is_terminal() {
            return Err(GraphError::CannotDeleteEndpoint);
        }
        let (incoming, outgoing) = (node.incoming, node.outgoing);
        if let Some(edge) = incoming {
            self.disconnect(edge)?;
        }
        if let Some(edge) = outgoing {
            self.disconnect(edge)?;
        }
        self.nodes[node_id.index() as usize] = None;
        Ok(())
    }

    /// Move a step so its center is at `(x, y)`, clamped so the node's full
    /// extent stays inside the canvas. Incident transitions are not
    /// re-clipped here; call [`FlowGraph::reposition_incident`] afterwards.
    pub fn move_node(
        &mut self,
        node_id: NodeId,
        x: i32,
        y: i32,
        canvas: Size,
    ) -> Result<(), GraphError> {
        let node = self
            .node_mut(node_id)
            .ok_or(GraphError::UnknownNode(node_id))?;
        let (w, h) = (node.size.width, node.size.height);

        let mut x = x;
        if x < w / 2 {
            x = w / 2;
        } else if x > canvas.width - w / 2 {
            x = canvas.width - w / 2;
        }
        let mut y = y;
        if y < h / 2 {
            y = h / 2;
        } else if y > canvas.height - h / 2 {
            y = canvas.height - h / 2;
        }

        node.pos = Point::new(x - w / 2, y - h / 2);
        Ok(())
    }

    /// Place a step's top-left corner without clamping (layout path).
    pub fn set_origin(&mut self, node_id: NodeId, pos: Point) -> Result<(), GraphError> {
        let node = self
            .node_mut(node_id)
            .ok_or(GraphError::UnknownNode(node_id))?;
        node.pos = pos;
        Ok(())
    }

    /// Recompute a transition's clipped endpoints from the current centers
    /// of its steps. Used after either endpoint moved.
    pub fn reposition(&mut self, edge_id: EdgeId) -> Result<(), GraphError> {
        let edge = self.edge(edge_id).ok_or(GraphError::UnknownEdge(edge_id))?;
        let (start, end) = (edge.start, edge.end);
        let (start_point, end_point) = self.clipped_endpoints(start, end);
        if let Some(edge) = self.edge_mut(edge_id) {
            edge.start_point = start_point;
            edge.end_point = end_point;
        }
        Ok(())
    }

    /// Re-clip both transitions incident to a step.
    pub fn reposition_incident(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let node = self.node(node_id).ok_or(GraphError::UnknownNode(node_id))?;
        let (incoming, outgoing) = (node.incoming, node.outgoing);
        if let Some(edge) = incoming {
            self.reposition(edge)?;
        }
        if let Some(edge) = outgoing {
            self.reposition(edge)?;
        }
        Ok(())
    }

    /// Visual endpoints for a line from `start` to `end`: source center, and
    /// the crossing with the target node's border.
    fn clipped_endpoints(&self, start: NodeId, end: NodeId) -> (Point, Point) {
        let (Some(start_node), Some(end_node)) = (self.node(start), self.node(end)) else {
            return (Point::default(), Point::default());
        };
        let c1 = start_node.center();
        let c2 = end_node.center();
        let hw = end_node.size.width as f64 / 2.0;
        let hh = end_node.size.height as f64 / 2.0;
        (c1, clip_to_border(c1, c2, hw, hh))
    }

    /// Whether `a` and `b` are already joined by a transition, in either
    /// direction.
    fn is_related(&self, a: NodeId, b: NodeId) -> bool {
        let Some(node) = self.node(a) else {
            return false;
        };
        [node.incoming, node.outgoing]
            .into_iter()
            .flatten()
            .any(|eid| {
                self.edge(eid)
                    .is_some_and(|e| e.start == b || e.end == b)
            })
    }

    /// Forward walk from `from` along outgoing transitions; true when the
    /// walk reaches `target`. Bounded by a visited set.
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut current = from;
        loop {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                // A loop in the stored links: invariants were already broken
                // elsewhere, stop instead of spinning.
                return false;
            }
            let next = self
                .node(current)
                .and_then(|n| n.outgoing)
                .and_then(|e| self.edge(e))
                .map(|e| e.end);
            match next {
                Some(next) => current = next,
                None => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{StepData, DEFAULT_NODE_SIZE};

    fn chain_graph() -> (FlowGraph, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut g = FlowGraph::new();
        let begin = g.add_node(StepKind::Begin, StepData::named("Begin"));
        let a = g.add_node(StepKind::Normal, StepData::named("a"));
        let b = g.add_node(StepKind::Normal, StepData::named("b"));
        let c = g.add_node(StepKind::Normal, StepData::named("c"));
        let end = g.add_node(StepKind::End, StepData::named("End"));
        (g, begin, a, b, c, end)
    }

    #[test]
    fn connect_wires_both_endpoints() {
        let (mut g, _, a, b, ..) = chain_graph();
        let edge = g.connect(a, b).unwrap().unwrap();
        assert_eq!(g.node(a).unwrap().outgoing, Some(edge));
        assert_eq!(g.node(b).unwrap().incoming, Some(edge));
        assert_eq!(g.edge(edge).unwrap().style, LineStyle::Solid);
    }

    #[test]
    fn connect_from_end_is_source_is_terminal() {
        let (mut g, _, a, _, _, end) = chain_graph();
        assert_eq!(g.connect(end, a), Err(ConnectError::SourceIsTerminal));
    }

    #[test]
    fn connect_to_begin_is_target_is_initial() {
        let (mut g, begin, a, ..) = chain_graph();
        assert_eq!(g.connect(a, begin), Err(ConnectError::TargetIsInitial));
    }

    #[test]
    fn second_outgoing_is_refused() {
        let (mut g, _, a, b, c, _) = chain_graph();
        g.connect(a, b).unwrap();
        assert_eq!(
            g.connect(a, c),
            Err(ConnectError::SourceAlreadyHasOutgoing)
        );
    }

    #[test]
    fn second_incoming_is_refused() {
        let (mut g, _, a, b, c, _) = chain_graph();
        g.connect(a, c).unwrap();
        assert_eq!(
            g.connect(b, c),
            Err(ConnectError::TargetAlreadyHasIncoming)
        );
    }

    #[test]
    fn two_node_cycle_is_refused() {
        let (mut g, _, a, b, ..) = chain_graph();
        assert!(g.connect(a, b).unwrap().is_some());
        assert_eq!(g.connect(b, a), Err(ConnectError::WouldCreateCycle));
    }

    #[test]
    fn three_node_cycle_is_refused() {
        let (mut g, _, a, b, c, _) = chain_graph();
        assert!(g.connect(a, b).unwrap().is_some());
        assert!(g.connect(b, c).unwrap().is_some());
        assert_eq!(g.connect(c, a), Err(ConnectError::WouldCreateCycle));
    }

    #[test]
    fn self_connection_is_a_silent_no_op() {
        let (mut g, _, a, ..) = chain_graph();
        assert_eq!(g.connect(a, a), Ok(None));
        assert!(g.node(a).unwrap().outgoing.is_none());
    }

    #[test]
    fn dashed_connect_marks_gray_and_current() {
        let (mut g, _, a, b, ..) = chain_graph();
        let edge = g
            .connect_styled(a, b, LineStyle::Dashed, Some("a"))
            .unwrap()
            .unwrap();
        assert_eq!(g.edge(edge).unwrap().style, LineStyle::Dashed);
        assert_eq!(g.node(b).unwrap().kind, StepKind::Gray);
        assert_eq!(g.node(a).unwrap().kind, StepKind::Current);
    }

    #[test]
    fn dashed_connect_leaves_terminal_target_alone() {
        let (mut g, _, a, _, _, end) = chain_graph();
        g.connect_styled(a, end, LineStyle::Dashed, None).unwrap();
        assert_eq!(g.node(end).unwrap().kind, StepKind::End);
        assert_eq!(g.node(a).unwrap().kind, StepKind::Normal);
    }

    #[test]
    fn disconnect_clears_both_sides() {
        let (mut g, _, a, b, ..) = chain_graph();
        let edge = g.connect(a, b).unwrap().unwrap();
        g.disconnect(edge).unwrap();
        assert!(g.node(a).unwrap().outgoing.is_none());
        assert!(g.node(b).unwrap().incoming.is_none());
        assert!(g.edge(edge).is_none());
        // The pair can now be re-connected.
        assert!(g.connect(a, b).unwrap().is_some());
    }

    #[test]
    fn remove_node_cascades_to_incident_edges() {
        let (mut g, _, a, b, c, _) = chain_graph();
        let e1 = g.connect(a, b).unwrap().unwrap();
        let e2 = g.connect(b, c).unwrap().unwrap();
        g.remove_node(b).unwrap();
        assert!(g.node(b).is_none());
        assert!(g.edge(e1).is_none());
        assert!(g.edge(e2).is_none());
        assert!(g.node(a).unwrap().outgoing.is_none());
        assert!(g.node(c).unwrap().incoming.is_none());
    }

    #[test]
    fn terminal_nodes_cannot_be_removed() {
        let (mut g, begin, _, _, _, end) = chain_graph();
        assert_eq!(g.remove_node(begin), Err(GraphError::CannotDeleteEndpoint));
        assert_eq!(g.remove_node(end), Err(GraphError::CannotDeleteEndpoint));
        assert_eq!(g.node_count(), 5);
    }

    #[test]
    fn move_node_clamps_to_canvas() {
        let (mut g, _, a, ..) = chain_graph();
        let canvas = Size::new(800, 600);
        let (hw, hh) = (DEFAULT_NODE_SIZE.width / 2, DEFAULT_NODE_SIZE.height / 2);

        g.move_node(a, -50, -50, canvas).unwrap();
        assert_eq!(g.node(a).unwrap().pos, Point::new(0, 0));

        g.move_node(a, 10_000, 10_000, canvas).unwrap();
        assert_eq!(g.node(a).unwrap().pos, Point::new(728, 528));
        // Center stays inside the canvas.
        let center = g.node(a).unwrap().center();
        assert_eq!(center, Point::new(800 - hw, 600 - hh));
    }

    #[test]
    fn reposition_tracks_moved_target() {
        let (mut g, _, a, b, ..) = chain_graph();
        let canvas = Size::new(1000, 1000);
        g.move_node(a, 100, 100, canvas).unwrap();
        g.move_node(b, 300, 100, canvas).unwrap();
        let edge = g.connect(a, b).unwrap().unwrap();

        // Horizontal line: clipped at the target's left border.
        let e = g.edge(edge).unwrap();
        assert_eq!(e.start_point, Point::new(100, 100));
        assert_eq!(e.end_point.x, 300 - DEFAULT_NODE_SIZE.width / 2 - 1);

        g.move_node(b, 100, 300, canvas).unwrap();
        g.reposition_incident(b).unwrap();
        let e = g.edge(edge).unwrap();
        assert_eq!(e.end_point.x, 100);
        assert_eq!(e.end_point.y, 300 - DEFAULT_NODE_SIZE.height / 2);
    }
}
