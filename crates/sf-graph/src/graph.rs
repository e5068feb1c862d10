//! Core graph data structures.
//!
//! Nodes and edges live in slotted arenas and refer to each other by
//! [`NodeId`]/[`EdgeId`] handles only; there are no object back-references.
//! Handles are never reused, so a stale handle resolves to `None` instead of
//! a different object.

use sf_core::{EdgeId, NodeId, Point, Rect, Size, bounding_frame, offset_polygon};

use crate::error::GraphError;

/// Default extent of a step node on the canvas.
pub const DEFAULT_NODE_SIZE: Size = Size {
    width: 73,
    height: 72,
};

/// Half-width of the selectable band around a connector line.
pub const LINE_MARGIN: i32 = 5;

/// Kind of a step node.
///
/// `Gray` and `Current` are presentation states of a `Normal` step ("not yet
/// reached" / "actively in progress"); they do not change connectivity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Begin,
    End,
    Normal,
    Gray,
    Current,
}

impl StepKind {
    /// Begin/end markers: created once per graph, never deleted.
    pub fn is_terminal(self) -> bool {
        matches!(self, StepKind::Begin | StepKind::End)
    }

    /// True for the Normal class of steps, including its presentation states.
    pub fn is_step(self) -> bool {
        !self.is_terminal()
    }
}

/// Style of a transition line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// Payload a step carries through to the external flow record.
///
/// `id` is an opaque external identifier, `tag` an opaque data blob; the
/// graph never interprets either beyond equality checks.
#[derive(Debug, Clone, PartialEq)]
pub struct StepData {
    pub id: String,
    pub name: String,
    pub tips: String,
    pub tag: serde_json::Value,
    pub index: i32,
    pub disconnected_from_next: bool,
    pub next_line_dashed: bool,
}

impl Default for StepData {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            tips: String::new(),
            tag: serde_json::Value::Null,
            index: 0,
            disconnected_from_next: false,
            next_line_dashed: false,
        }
    }
}

impl StepData {
    /// Convenience for tests and ad-hoc construction.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            ..Self::default()
        }
    }
}

/// A step in the process.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: StepKind,
    pub data: StepData,
    /// Top-left corner on the canvas.
    pub pos: Point,
    pub size: Size,
    pub incoming: Option<EdgeId>,
    pub outgoing: Option<EdgeId>,
    pub selected: bool,
}

impl Node {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }
}

/// A directed transition between exactly two steps.
///
/// `start_point`/`end_point` are the visual endpoints: the source center and
/// the point where the line meets the target node's border.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub start: NodeId,
    pub end: NodeId,
    pub style: LineStyle,
    pub selected: bool,
    pub start_point: Point,
    pub end_point: Point,
}

/// Local coordinate space of a connector: the frame enclosing the line plus
/// its margin, with the endpoints re-expressed relative to the frame origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeFrame {
    pub origin: Point,
    pub size: Size,
    pub start: Point,
    pub end: Point,
}

impl Edge {
    /// Closed polygon around the line, used for hit-testing and paint clipping.
    pub fn hit_region(&self) -> [Point; 5] {
        offset_polygon(self.start_point, self.end_point, LINE_MARGIN)
    }

    /// Minimal enclosing frame with the endpoints in local coordinates.
    pub fn frame(&self) -> EdgeFrame {
        let (origin, size) = bounding_frame(self.start_point, self.end_point, LINE_MARGIN);
        EdgeFrame {
            origin,
            size,
            start: self.start_point.relative_to(origin),
            end: self.end_point.relative_to(origin),
        }
    }
}

/// The workflow graph: an arena of steps and transitions enforcing the chain
/// shape (every node at most one incoming and one outgoing edge, acyclic).
///
/// The graph exclusively owns its nodes and edges; callers hold handles and
/// request mutations through the operations in [`crate::connect`].
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) edges: Vec<Option<Edge>>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a step node with default position and size, returning its handle.
    pub fn add_node(&mut self, kind: StepKind, data: StepData) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Some(Node {
            id,
            kind,
            data,
            pos: Point::default(),
            size: DEFAULT_NODE_SIZE,
            incoming: None,
            outgoing: None,
            selected: false,
        }));
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index() as usize)?.as_ref()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index() as usize)?.as_mut()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index() as usize)?.as_ref()
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index() as usize)?.as_mut()
    }

    /// All live nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    /// All live edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().flatten()
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// First node of the given kind, if any.
    pub fn first_of_kind(&self, kind: StepKind) -> Option<NodeId> {
        self.nodes().find(|n| n.kind == kind).map(|n| n.id)
    }

    pub fn count_of_kind(&self, kind: StepKind) -> usize {
        self.nodes().filter(|n| n.kind == kind).count()
    }

    /// Number of Normal-class steps (includes Gray/Current presentation states).
    pub fn step_count(&self) -> usize {
        self.nodes().filter(|n| n.kind.is_step()).count()
    }

    /// Replace a step's carried record data. Connectivity is untouched.
    pub fn set_node_data(&mut self, id: NodeId, data: StepData) -> Result<(), GraphError> {
        let node = self.node_mut(id).ok_or(GraphError::UnknownNode(id))?;
        node.data = data;
        Ok(())
    }

    pub fn set_node_selected(&mut self, id: NodeId, selected: bool) -> Result<(), GraphError> {
        let node = self.node_mut(id).ok_or(GraphError::UnknownNode(id))?;
        node.selected = selected;
        Ok(())
    }

    pub fn set_edge_selected(&mut self, id: EdgeId, selected: bool) -> Result<(), GraphError> {
        let edge = self.edge_mut(id).ok_or(GraphError::UnknownEdge(id))?;
        edge.selected = selected;
        Ok(())
    }

    /// Drop every selection flag on nodes and edges.
    pub fn clear_selection(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            node.selected = false;
        }
        for edge in self.edges.iter_mut().flatten() {
            edge.selected = false;
        }
    }
}
