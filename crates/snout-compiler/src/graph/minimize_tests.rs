use snout_core::TerminalId;

use crate::graph::{Edge, MinimalTransitionGraph, Node, NodeId, TransitionGraph, minimize};

const A: TerminalId = TerminalId::new(0);
const B: TerminalId = TerminalId::new(1);
const C: TerminalId = TerminalId::new(2);

fn graph(nodes: &[&[(TerminalId, NodeId)]]) -> TransitionGraph {
    TransitionGraph::new(
        nodes
            .iter()
            .map(|edges| Node::new(edges.iter().map(|&(t, n)| Edge::new(t, n)).collect()))
            .collect(),
    )
}

/// Every original edge, remapped, is an edge of the remapped source.
#[track_caller]
fn assert_sound(original: &TransitionGraph, minimal: &MinimalTransitionGraph) {
    for (id, node) in original.iter() {
        let representative = minimal.remap(id);
        let live = minimal
            .node(representative)
            .unwrap_or_else(|| panic!("N{id} remaps to merged N{representative}"));
        for edge in &node.edges {
            assert_eq!(live.target(edge.terminal), Some(minimal.remap(edge.target)));
        }
        assert_eq!(live.edges.len(), node.edges.len());
    }
}

#[track_caller]
fn assert_fixpoint(minimal: &MinimalTransitionGraph) {
    let live: Vec<_> = minimal.live().collect();
    for (i, (a_id, a)) in live.iter().enumerate() {
        for (b_id, b) in &live[i + 1..] {
            assert_ne!(a, b, "N{a_id} and N{b_id} are still equal");
        }
        for edge in &a.edges {
            assert!(minimal.is_live(edge.target), "N{a_id} targets merged N{}", edge.target);
        }
    }
}

#[test]
fn merges_cascade() {
    // N3 and N4 are equal ends; merging them makes N1 and N2 equal.
    let original = graph(&[&[(A, 1), (B, 2)], &[(C, 3)], &[(C, 4)], &[], &[]]);

    let (minimal, stats) = minimize(&original);

    assert_eq!(stats.merged, 2);
    assert_eq!(stats.live, 3);
    assert_eq!(minimal.remap_table(), [0, 1, 1, 3, 3]);
    assert_eq!(minimal.node(0).unwrap().edges, [Edge::new(A, 1), Edge::new(B, 1)]);
    assert!(!minimal.is_live(2));
    assert!(!minimal.is_live(4));
    assert_sound(&original, &minimal);
    assert_fixpoint(&minimal);
}

#[test]
fn entry_node_survives() {
    let original = graph(&[&[], &[]]);

    let (minimal, stats) = minimize(&original);

    assert_eq!(stats.merged, 1);
    assert!(minimal.is_live(0));
    assert_eq!(minimal.remap(1), 0);
}

#[test]
fn distinct_nodes_are_kept() {
    let original = graph(&[&[(A, 1)], &[(B, 1)], &[(B, 2)]]);

    let (minimal, stats) = minimize(&original);

    // N1 and N2 loop on themselves, so their edge lists differ.
    assert_eq!(stats.merged, 0);
    assert_eq!(minimal.live_count(), 3);
    assert_fixpoint(&minimal);
}

#[test]
fn never_adds_edges() {
    let original = graph(&[
        &[(A, 1), (B, 2), (C, 3)],
        &[(B, 4)],
        &[(B, 4)],
        &[(A, 4), (C, 4)],
        &[],
    ]);

    let (minimal, _) = minimize(&original);

    assert!(minimal.edge_count() <= original.edge_count());
    let entry_terminals: Vec<_> = minimal
        .node(0)
        .unwrap()
        .edges
        .iter()
        .map(|e| e.terminal)
        .collect();
    assert_eq!(entry_terminals, [A, B, C]);
    assert_sound(&original, &minimal);
    assert_fixpoint(&minimal);
}
