use snout_core::TerminalId;

use crate::grammar::NonterminalId;
use crate::graph::{Edge, MalformedAutomaton, resolve};
use crate::table::{Action, ParseTable, ReductionRule};

const A: TerminalId = TerminalId::new(0);
const B: TerminalId = TerminalId::new(1);
const END: TerminalId = TerminalId::new(2);
const X: NonterminalId = NonterminalId::new(0);

fn table(state_count: usize) -> ParseTable {
    let terminals = ["A", "B", "$end"].map(String::from).to_vec();
    let mut table = ParseTable::new(terminals, vec!["x".to_string()], state_count);
    table.push_rule(ReductionRule { produces: X, len: 1 });
    table
}

#[test]
fn shifts_become_edges() {
    let mut table = table(3);
    table.set_action(0, A, Action::Shift(1));
    table.set_action(1, B, Action::Shift(2));
    table.set_action(2, END, Action::Accept);

    let graph = resolve(&table, &[B, A, A]).unwrap();

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.node(0).edges, [Edge::new(A, 1)]);
    assert_eq!(graph.node(1).edges, [Edge::new(B, 2)]);
    assert!(graph.node(2).is_end());
}

#[test]
fn reduce_chain_is_followed() {
    let mut table = table(4);
    table.set_action(0, A, Action::Shift(1));
    table.set_action(1, B, Action::Reduce(0));
    table.set_goto(1, X, 2);
    table.set_action(2, B, Action::Shift(3));

    let graph = resolve(&table, &[A, B]).unwrap();

    assert_eq!(graph.node(1).edges, [Edge::new(B, 3)]);
}

#[test]
fn broken_chain_has_no_edge() {
    let mut table = table(2);
    table.set_action(0, A, Action::Reduce(0));
    table.set_action(1, A, Action::Reduce(7));

    let graph = resolve(&table, &[A, B]).unwrap();

    assert!(graph.node(0).is_end());
    assert!(graph.node(1).is_end());
}

#[test]
fn chain_ending_in_accept_has_no_edge() {
    let mut table = table(2);
    table.set_action(0, A, Action::Reduce(0));
    table.set_goto(0, X, 1);
    table.set_action(1, A, Action::Accept);

    let graph = resolve(&table, &[A]).unwrap();
    assert!(graph.node(0).is_end());
}

#[test]
fn end_marker_is_never_an_edge() {
    let mut table = table(2);
    table.set_action(0, END, Action::Shift(1));

    let graph = resolve(&table, &[A, B]).unwrap();
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn cyclic_chain_is_malformed() {
    let mut table = table(2);
    table.set_action(0, A, Action::Shift(1));
    table.set_action(1, B, Action::Reduce(0));
    table.set_goto(1, X, 1);

    let err = resolve(&table, &[A, B]).unwrap_err();

    assert_eq!(
        err,
        MalformedAutomaton {
            state: 1,
            terminal: B,
            bound: 2,
        }
    );
    insta::assert_snapshot!(err, @"reduce chain from state 1 on t1 exceeds 2 steps");
}
