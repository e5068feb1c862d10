//! The editing session: graph ownership, selection, and gesture handling.

use sf_core::{NodeId, Point, Size};
use sf_graph::{EdgeId, FlowGraph, GraphError, LineStyle, StepData, StepKind};
use sf_layout::auto_layout;
use sf_project::{FlowDef, export};

/// Where refused operations report themselves. Hosts typically route this
/// to a status bar or message box.
pub trait WarningSink {
    fn warn(&mut self, message: &str);
}

/// At most one object is selected at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selected {
    Node(NodeId),
    Edge(EdgeId),
}

/// One open workflow being edited.
///
/// All mutation goes through the session so selection state, read-only
/// enforcement, and connector re-clipping stay consistent with the graph.
pub struct EditorSession {
    graph: FlowGraph,
    flow_id: String,
    current_step: Option<String>,
    canvas: Size,
    selection: Option<Selected>,
    read_only: bool,
}

impl EditorSession {
    pub fn new(canvas: Size) -> Self {
        Self {
            graph: FlowGraph::new(),
            flow_id: String::new(),
            current_step: None,
            canvas,
            selection: None,
            read_only: false,
        }
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn selection(&self) -> Option<Selected> {
        self.selection
    }

    /// The externally-tracked in-progress step id, as given to `load`.
    pub fn current_step(&self) -> Option<&str> {
        self.current_step.as_deref()
    }

    /// A read-only session ignores mutating gestures; viewers use this to
    /// show a flow's progress without letting it be edited.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn clear(&mut self) {
        self.graph = FlowGraph::new();
        self.flow_id.clear();
        self.current_step = None;
        self.selection = None;
    }

    /// Replace the session contents with `flow`, materialized and laid out.
    ///
    /// `current_step` is the externally-tracked in-progress step id, used to
    /// mark the Current/Gray presentation states on dashed transitions.
    pub fn load(&mut self, flow: &FlowDef, current_step: Option<&str>) {
        self.clear();
        self.flow_id = flow.id.clone();
        self.current_step = current_step.map(str::to_owned);
        self.graph = sf_project::import(flow, current_step);
        auto_layout(&mut self.graph, self.canvas.width);
        tracing::debug!(flow = %self.flow_id, steps = flow.steps.len(), "flow loaded");
    }

    /// Linearize the graph back into a flow definition.
    ///
    /// Returns `None` and reports a warning when the chain is not complete
    /// enough to serialize.
    pub fn save(&self, sink: &mut dyn WarningSink) -> Option<FlowDef> {
        match export(&self.graph) {
            Ok(steps) => Some(FlowDef {
                id: self.flow_id.clone(),
                steps,
            }),
            Err(err) => {
                sink.warn(&err.to_string());
                None
            }
        }
    }

    /// Add a fresh step at the canvas center, unconnected. An empty id gets
    /// a generated one so the step can be addressed in the saved flow.
    pub fn add_step(&mut self, mut data: StepData) -> Option<NodeId> {
        if self.read_only {
            return None;
        }
        if data.id.is_empty() {
            data.id = uuid::Uuid::new_v4().to_string();
        }
        let id = self.graph.add_node(StepKind::Normal, data);
        let origin = Point::new(self.canvas.width / 2, self.canvas.height / 2);
        let _ = self.graph.set_origin(id, origin);
        tracing::debug!(?id, "step added");
        Some(id)
    }

    /// Replace the selected step's record data. Ignored unless a
    /// Normal-class step is selected.
    pub fn update_selected_step(&mut self, data: StepData) {
        if self.read_only {
            return;
        }
        if let Some(Selected::Node(id)) = self.selection {
            let is_step = self
                .graph
                .node(id)
                .is_some_and(|n| n.kind.is_step());
            if is_step {
                let _ = self.graph.set_node_data(id, data);
            }
        }
    }

    /// Delete the selected object. Begin/End steps refuse deletion with a
    /// warning; deleting a step also removes its transitions.
    pub fn remove_selected(&mut self, sink: &mut dyn WarningSink) {
        if self.read_only {
            return;
        }
        match self.selection {
            Some(Selected::Node(id)) => match self.graph.remove_node(id) {
                Ok(()) => self.selection = None,
                Err(GraphError::CannotDeleteEndpoint) => {
                    sink.warn("the begin and end steps cannot be deleted");
                }
                Err(err) => sink.warn(&err.to_string()),
            },
            Some(Selected::Edge(id)) => {
                let _ = self.graph.disconnect(id);
                self.selection = None;
            }
            None => {}
        }
    }

    pub fn auto_layout(&mut self) {
        auto_layout(&mut self.graph, self.canvas.width);
    }

    /// The step payload currently selected, if the selection is a step.
    pub fn selected_step(&self) -> Option<&StepData> {
        match self.selection {
            Some(Selected::Node(id)) => self
                .graph
                .node(id)
                .filter(|n| n.kind.is_step())
                .map(|n| &n.data),
            _ => None,
        }
    }

    /// Select the step whose record sits at `index` in the flow's step
    /// list. Used by hosts that track progress externally.
    pub fn select_by_index(&mut self, index: i32) {
        self.graph.clear_selection();
        self.selection = None;
        let found = self
            .graph
            .nodes()
            .find(|n| n.kind.is_step() && n.data.index == index)
            .map(|n| n.id);
        if let Some(id) = found {
            let _ = self.graph.set_node_selected(id, true);
            self.selection = Some(Selected::Node(id));
        }
    }

    pub fn select_node(&mut self, id: NodeId) {
        self.graph.clear_selection();
        if self.graph.set_node_selected(id, true).is_ok() {
            self.selection = Some(Selected::Node(id));
        } else {
            self.selection = None;
        }
    }

    pub fn select_edge(&mut self, id: EdgeId) {
        self.graph.clear_selection();
        if self.graph.set_edge_selected(id, true).is_ok() {
            self.selection = Some(Selected::Edge(id));
        } else {
            self.selection = None;
        }
    }

    /// Pointer drag on a step: the step's center follows the pointer,
    /// clamped to the canvas, and its connectors re-clip.
    pub fn node_dragged(&mut self, id: NodeId, x: i32, y: i32) {
        if self.read_only {
            return;
        }
        if self.graph.move_node(id, x, y, self.canvas).is_ok() {
            let _ = self.graph.reposition_incident(id);
        }
    }

    /// A connector drag released over `target` (or empty canvas). The new
    /// transition's style follows the source step's dashed flag; validation
    /// failures are reported, not raised.
    pub fn edge_drag_released_over(
        &mut self,
        start: NodeId,
        target: Option<NodeId>,
        sink: &mut dyn WarningSink,
    ) {
        if self.read_only {
            return;
        }
        let Some(target) = target else {
            return;
        };
        let style = self
            .graph
            .node(start)
            .filter(|n| n.data.next_line_dashed)
            .map_or(LineStyle::Solid, |_| LineStyle::Dashed);
        // The current-step marker only applies while a flow is loaded; an
        // interactive connect never re-kinds the source step.
        match self.graph.connect_styled(start, target, style, None) {
            Ok(Some(edge)) => tracing::debug!(?edge, "transition created"),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%err, "connection refused");
                sink.warn(&err.to_string());
            }
        }
    }

    /// Delete-key handling; same rules as [`EditorSession::remove_selected`].
    pub fn delete_requested(&mut self, sink: &mut dyn WarningSink) {
        self.remove_selected(sink);
    }

    /// Double-activation on a step: select it and hand its payload to the
    /// host, which typically opens an edit dialog over it.
    pub fn node_activated(&mut self, id: NodeId) -> Option<&StepData> {
        self.select_node(id);
        self.selected_step()
    }
}
