//! Transition graphs over actions.
//!
//! A node is an automaton state; an edge says which action moves the
//! builder to which state. Node 0 is the entry state.
//!
//! - `resolve`: parse table → [`TransitionGraph`]
//! - `minimize`: merge nodes with identical edges → [`MinimalTransitionGraph`]
//! - `reach`: nodes reachable from the entry
//! - `dump`: text rendering for tests and the CLI

mod dump;
mod minimize;
mod reach;
mod resolve;

#[cfg(test)]
mod minimize_tests;
#[cfg(test)]
mod resolve_tests;

pub use dump::GraphPrinter;
pub use minimize::{MinimizeStats, minimize};
pub use reach::reachable;
pub use resolve::{MalformedAutomaton, resolve};

use snout_core::TerminalId;

pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub terminal: TerminalId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(terminal: TerminalId, target: NodeId) -> Self {
        Self { terminal, target }
    }
}

/// Outgoing edges in terminal order, at most one per terminal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Node {
    pub edges: Vec<Edge>,
}

impl Node {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    /// No action leads anywhere from here.
    pub fn is_end(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn target(&self, terminal: TerminalId) -> Option<NodeId> {
        self.edges
            .iter()
            .find(|e| e.terminal == terminal)
            .map(|e| e.target)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionGraph {
    nodes: Vec<Node>,
}

impl TransitionGraph {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as NodeId, n))
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }
}

/// Graph after merging. Merged slots are tombstones; `remap` sends every
/// original node to its live representative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MinimalTransitionGraph {
    nodes: Vec<Option<Node>>,
    remap: Vec<NodeId>,
}

impl MinimalTransitionGraph {
    pub(crate) fn new(nodes: Vec<Option<Node>>, remap: Vec<NodeId>) -> Self {
        Self { nodes, remap }
    }

    /// Slot count, tombstones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `None` for merged nodes.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize).and_then(Option::as_ref)
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Live nodes in index order.
    pub fn live(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (i as NodeId, n)))
    }

    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn edge_count(&self) -> usize {
        self.live().map(|(_, n)| n.edges.len()).sum()
    }

    /// Live representative of an original node.
    pub fn remap(&self, original: NodeId) -> NodeId {
        self.remap[original as usize]
    }

    pub fn remap_table(&self) -> &[NodeId] {
        &self.remap
    }
}
