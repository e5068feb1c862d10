use sf_graph::StepKind;
use sf_project::schema::*;
use sf_project::{ExportError, export, import};

fn step(id: &str) -> StepDef {
    StepDef {
        id: id.to_string(),
        name: id.to_string(),
        ..StepDef::default()
    }
}

#[test]
fn export_of_an_imported_list_reproduces_it() {
    let flow = FlowDef {
        id: "f".to_string(),
        steps: vec![step("a"), step("b"), step("c")],
    };

    let graph = import(&flow, None);
    let exported = export(&graph).unwrap();

    let ids: Vec<_> = exported.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    for (i, s) in exported.iter().enumerate() {
        assert_eq!(s.index, i as i32);
    }
}

#[test]
fn disconnected_flag_leaves_a_gap_in_the_chain() {
    let mut b = step("b");
    b.disconnected_from_next = true;
    let flow = FlowDef {
        id: "f".to_string(),
        steps: vec![step("a"), b, step("c")],
    };

    let graph = import(&flow, None);

    let b = graph.nodes().find(|n| n.data.id == "b").unwrap();
    let c = graph.nodes().find(|n| n.data.id == "c").unwrap();
    assert!(b.outgoing.is_none());
    assert!(c.incoming.is_none());

    // The walk from Begin reaches a and b, then stops short of c.
    assert_eq!(export(&graph), Err(ExportError::IncompleteChain));
}

#[test]
fn dashed_transition_grays_the_target_until_reached() {
    let mut a = step("a");
    a.next_line_dashed = true;
    let flow = FlowDef {
        id: "f".to_string(),
        steps: vec![a, step("b"), step("c")],
    };

    let graph = import(&flow, Some("a"));

    let a = graph.nodes().find(|n| n.data.id == "a").unwrap();
    let b = graph.nodes().find(|n| n.data.id == "b").unwrap();
    assert_eq!(a.kind, StepKind::Current);
    assert_eq!(b.kind, StepKind::Gray);

    // Gray and Current steps still export as ordinary records.
    let exported = export(&graph).unwrap();
    assert_eq!(exported.len(), 3);
    assert!(!exported[0].next_line_dashed);
}
