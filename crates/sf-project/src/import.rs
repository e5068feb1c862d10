//! Rebuild a workflow graph from an ordered step list.

use sf_graph::{FlowGraph, LineStyle, StepData, StepKind};

use crate::schema::FlowDef;

/// Materialize a flow definition as a graph: a begin step, one Normal-class
/// step per record in list order, and an end step unless the final record is
/// flagged as disconnected from its successor.
///
/// Records flagged `disconnected_from_next` leave a gap in the chain instead
/// of a transition. `current_step` marks which step id, if any, should render
/// as the in-progress step when a dashed transition reaches it.
///
/// Nodes are created at the origin; run the auto-layout pass to place them.
pub fn import(flow: &FlowDef, current_step: Option<&str>) -> FlowGraph {
    let mut graph = FlowGraph::new();
    let begin = graph.add_node(StepKind::Begin, StepData::named("Begin"));

    let mut prev = begin;
    let mut disconnected = false;
    for def in &flow.steps {
        let mut dashed = false;
        if !disconnected {
            dashed = graph
                .node(prev)
                .is_some_and(|n| n.kind.is_step() && n.data.next_line_dashed);
        }
        let node = graph.add_node(StepKind::Normal, def.to_data());
        if !disconnected {
            let style = if dashed { LineStyle::Dashed } else { LineStyle::Solid };
            // Connect failures here mean a malformed list; the step still
            // lands in the graph, just without the transition.
            let _ = graph.connect_styled(prev, node, style, current_step);
        }
        prev = node;
        disconnected = def.disconnected_from_next;
    }

    if !disconnected {
        let dashed = graph
            .node(prev)
            .is_some_and(|n| n.kind.is_step() && n.data.next_line_dashed);
        let end = graph.add_node(StepKind::End, StepData::named("End"));
        // An empty flow still shows both endpoints, just without a line.
        if !flow.steps.is_empty() {
            let style = if dashed { LineStyle::Dashed } else { LineStyle::Solid };
            let _ = graph.connect_styled(prev, end, style, None);
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StepDef;

    fn step(id: &str) -> StepDef {
        StepDef {
            id: id.to_string(),
            name: id.to_string(),
            ..StepDef::default()
        }
    }

    #[test]
    fn empty_list_yields_unconnected_endpoints() {
        let flow = FlowDef {
            id: "f".into(),
            steps: Vec::new(),
        };
        let graph = import(&flow, None);
        assert_eq!(graph.count_of_kind(StepKind::Begin), 1);
        assert_eq!(graph.count_of_kind(StepKind::End), 1);
        let begin = graph.first_of_kind(StepKind::Begin).unwrap();
        assert!(graph.node(begin).unwrap().outgoing.is_none());
    }

    #[test]
    fn dashed_flag_styles_the_following_transition() {
        let mut a = step("a");
        a.next_line_dashed = true;
        let flow = FlowDef {
            id: "f".into(),
            steps: vec![a, step("b")],
        };
        let graph = import(&flow, None);
        let b = graph.nodes().find(|n| n.data.id == "b").unwrap();
        let edge = graph.edge(b.incoming.unwrap()).unwrap();
        assert_eq!(edge.style, LineStyle::Dashed);
        // Dashed arrivals render the target as not-yet-reached.
        assert_eq!(b.kind, StepKind::Gray);
    }

    #[test]
    fn current_step_marks_the_source_of_a_dashed_transition() {
        let mut a = step("a");
        a.next_line_dashed = true;
        let flow = FlowDef {
            id: "f".into(),
            steps: vec![a, step("b")],
        };
        let graph = import(&flow, Some("a"));
        let a = graph.nodes().find(|n| n.data.id == "a").unwrap();
        assert_eq!(a.kind, StepKind::Current);
    }

    #[test]
    fn dashed_flag_on_the_last_step_styles_the_final_transition() {
        let mut a = step("a");
        a.next_line_dashed = true;
        let flow = FlowDef {
            id: "f".into(),
            steps: vec![a],
        };
        let graph = import(&flow, None);
        let end = graph.first_of_kind(StepKind::End).unwrap();
        let end = graph.node(end).unwrap();
        let edge = graph.edge(end.incoming.unwrap()).unwrap();
        assert_eq!(edge.style, LineStyle::Dashed);
        // A dashed arrival never re-kinds the terminal end step.
        assert_eq!(end.kind, StepKind::End);
    }

    #[test]
    fn disconnected_last_step_suppresses_the_end_node() {
        let mut b = step("b");
        b.disconnected_from_next = true;
        let flow = FlowDef {
            id: "f".into(),
            steps: vec![step("a"), b],
        };
        let graph = import(&flow, None);
        assert_eq!(graph.count_of_kind(StepKind::End), 0);
    }
}
