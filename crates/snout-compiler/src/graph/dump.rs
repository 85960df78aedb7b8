//! Dump helpers for graph inspection and testing.

use std::fmt::{self, Write};

use snout_core::Colors;

use super::{MinimalTransitionGraph, Node, NodeId, TransitionGraph};

/// Printer for transition graphs, before or after minimization.
pub struct GraphPrinter<'a> {
    nodes: Vec<Option<&'a Node>>,
    remap: Option<&'a [NodeId]>,
    terminals: &'a [String],
    show_merged: bool,
    colors: Colors,
}

impl<'a> GraphPrinter<'a> {
    /// `terminals` names terminals by index.
    pub fn new(graph: &'a TransitionGraph, terminals: &'a [String]) -> Self {
        Self {
            nodes: graph.iter().map(|(_, n)| Some(n)).collect(),
            remap: None,
            terminals,
            show_merged: true,
            colors: Colors::OFF,
        }
    }

    pub fn minimal(graph: &'a MinimalTransitionGraph, terminals: &'a [String]) -> Self {
        Self {
            nodes: (0..graph.len() as NodeId).map(|id| graph.node(id)).collect(),
            remap: Some(graph.remap_table()),
            terminals,
            show_merged: true,
            colors: Colors::OFF,
        }
    }

    /// Print a `✗ → Nk` line for every merged node.
    pub fn show_merged(mut self, show: bool) -> Self {
        self.show_merged = show;
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> fmt::Result {
        let c = &self.colors;
        for (id, node) in self.nodes.iter().enumerate() {
            let name = c.state(&format!("N{id}"));
            let Some(node) = node else {
                if self.show_merged {
                    let target = self.remap.map_or(id as NodeId, |r| r[id]);
                    writeln!(w, "{name}: {}", c.muted(&format!("✗ → N{target}")))?;
                }
                continue;
            };

            if node.is_end() {
                writeln!(w, "{name}: {}", c.muted("end"))?;
                continue;
            }

            let edges: Vec<String> = node
                .edges
                .iter()
                .map(|e| {
                    let terminal = self
                        .terminals
                        .get(e.terminal.index())
                        .map_or_else(|| e.terminal.to_string(), Clone::clone);
                    format!(
                        "{} {} {}",
                        c.action(&terminal),
                        c.muted("→"),
                        c.state(&format!("N{}", e.target))
                    )
                })
                .collect();
            writeln!(w, "{name}: {}", edges.join(", "))?;
        }
        Ok(())
    }
}
