//! Reachability from the entry node.

use std::collections::HashSet;

use super::{MinimalTransitionGraph, NodeId};

/// Live nodes reachable from node 0 by following edges.
pub fn reachable(graph: &MinimalTransitionGraph) -> HashSet<NodeId> {
    let mut reachable = HashSet::new();
    if graph.node(0).is_none() {
        return reachable;
    }

    let mut queue: Vec<NodeId> = vec![0];
    while let Some(id) = queue.pop() {
        if !reachable.insert(id) {
            continue;
        }
        if let Some(node) = graph.node(id) {
            queue.extend(node.edges.iter().map(|e| e.target));
        }
    }
    reachable
}
