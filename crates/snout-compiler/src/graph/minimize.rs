//! Merges nodes whose edge lists are identical.
//!
//! # Algorithm
//!
//! 1. Scan live pairs `(i, j)` with `i < j`
//! 2. On equal edges: tombstone `j`, retarget edges into `j` to `i`, point
//!    every remap entry for `j` at `i`
//! 3. Restart the scan; stop when a full scan merges nothing
//!
//! The lower index always survives, so the entry node is never merged away.

use super::{MinimalTransitionGraph, Node, NodeId, TransitionGraph};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MinimizeStats {
    /// Nodes merged into another.
    pub merged: usize,
    /// Nodes left.
    pub live: usize,
}

pub fn minimize(graph: &TransitionGraph) -> (MinimalTransitionGraph, MinimizeStats) {
    let mut nodes: Vec<Option<Node>> = graph.iter().map(|(_, n)| Some(n.clone())).collect();
    let mut remap: Vec<NodeId> = (0..nodes.len() as NodeId).collect();
    let mut stats = MinimizeStats::default();

    while let Some((keep, drop)) = find_equal_pair(&nodes) {
        merge(&mut nodes, &mut remap, keep, drop);
        stats.merged += 1;
    }

    stats.live = nodes.iter().filter(|n| n.is_some()).count();
    tracing::debug!(merged = stats.merged, live = stats.live, "minimized transition graph");
    (MinimalTransitionGraph::new(nodes, remap), stats)
}

fn find_equal_pair(nodes: &[Option<Node>]) -> Option<(NodeId, NodeId)> {
    for (i, a) in nodes.iter().enumerate() {
        let Some(a) = a else { continue };
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            if b.as_ref() == Some(a) {
                return Some((i as NodeId, j as NodeId));
            }
        }
    }
    None
}

fn merge(nodes: &mut [Option<Node>], remap: &mut [NodeId], keep: NodeId, drop: NodeId) {
    nodes[drop as usize] = None;
    for node in nodes.iter_mut().flatten() {
        for edge in &mut node.edges {
            if edge.target == drop {
                edge.target = keep;
            }
        }
    }
    for entry in remap.iter_mut() {
        if *entry == drop {
            *entry = keep;
        }
    }
}
