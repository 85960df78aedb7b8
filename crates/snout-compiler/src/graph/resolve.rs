//! Parse table → transition graph by following reduce chains.
//!
//! For a state and a terminal, reductions are followed through the goto
//! table without popping anything, until the terminal is shifted (an edge)
//! or the chain breaks (no edge).

use std::fmt;

use snout_core::TerminalId;

use super::{Edge, Node, NodeId, TransitionGraph};
use crate::table::{Action, ParseTable, StateId};

/// A reduce chain that did not settle within `bound` steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedAutomaton {
    pub state: StateId,
    pub terminal: TerminalId,
    pub bound: usize,
}

impl fmt::Display for MalformedAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reduce chain from state {} on {} exceeds {} steps",
            self.state, self.terminal, self.bound
        )
    }
}

impl std::error::Error for MalformedAutomaton {}

/// Edges for every state over `terminals`, which are visited in index order.
pub fn resolve(
    table: &ParseTable,
    terminals: &[TerminalId],
) -> Result<TransitionGraph, MalformedAutomaton> {
    let mut terminals = terminals.to_vec();
    terminals.sort_unstable();
    terminals.dedup();

    let bound = table.state_count();
    let mut nodes = Vec::with_capacity(bound);
    for state in 0..bound as StateId {
        let mut edges = Vec::new();
        for &terminal in &terminals {
            if let Some(target) = follow(table, state, terminal, bound)? {
                edges.push(Edge::new(terminal, target));
            }
        }
        nodes.push(Node::new(edges));
    }

    let graph = TransitionGraph::new(nodes);
    tracing::debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "resolved transition graph"
    );
    Ok(graph)
}

fn follow(
    table: &ParseTable,
    state: StateId,
    terminal: TerminalId,
    bound: usize,
) -> Result<Option<NodeId>, MalformedAutomaton> {
    let mut current = state;
    for _ in 0..=bound {
        match table.action(current, terminal) {
            Action::Shift(target) => return Ok(Some(target)),
            Action::Error | Action::Accept => return Ok(None),
            Action::Reduce(rule) => {
                let Some(rule) = table.rule(rule) else {
                    return Ok(None);
                };
                match table.goto(current, rule.produces) {
                    Some(next) => current = next,
                    None => return Ok(None),
                }
            }
        }
    }
    Err(MalformedAutomaton {
        state,
        terminal,
        bound,
    })
}
