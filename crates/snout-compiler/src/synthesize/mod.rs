//! Fluent state synthesis: minimal graph + catalog → state descriptors.
//!
//! One descriptor per live node that has outgoing edges, in node order. Each
//! edge becomes an operation named after its action. Nodes without edges get
//! no descriptor; operations leading there are [`OperationTarget::End`].

mod config;
mod dump;

#[cfg(test)]
mod synthesize_tests;

pub use config::SynthesisConfig;
pub use dump::StatePrinter;

use snout_core::{ActionCatalog, ActionMetadata};

use crate::graph::{self, MinimalTransitionGraph, NodeId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateDescriptor {
    pub name: String,
    pub node: NodeId,
    pub operations: Vec<Operation>,
}

impl StateDescriptor {
    pub fn is_entry(&self) -> bool {
        self.node == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    /// Action display name.
    pub name: String,
    /// Builder method the operation forwards to.
    pub builder_method: String,
    pub documentation: String,
    pub kind: OperationKind,
    pub target: OperationTarget,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationKind {
    /// Accessor-like, no argument list.
    Property,
    Method {
        params: Vec<ParamDescriptor>,
        generics: Vec<GenericArg>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub name: String,
    /// Rendered type.
    pub ty: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericArg {
    /// As written in a turbofish.
    pub rendered: String,
    /// Declaration with bounds, for parameters the operation introduces.
    pub declaration: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationTarget {
    State { name: String, node: NodeId },
    /// Nothing can follow; the build may be finished.
    End,
}

pub fn synthesize(
    graph: &MinimalTransitionGraph,
    catalog: &ActionCatalog,
    config: &SynthesisConfig,
) -> Vec<StateDescriptor> {
    let reachable = config.prune_unreachable.then(|| graph::reachable(graph));

    let mut states = Vec::new();
    for (id, node) in graph.live() {
        if node.is_end() {
            continue;
        }
        if reachable.as_ref().is_some_and(|r| !r.contains(&id)) {
            tracing::trace!(node = id, "pruned unreachable state");
            continue;
        }

        let mut operations = Vec::with_capacity(node.edges.len());
        for edge in &node.edges {
            let Some(action) = catalog.get(edge.terminal) else {
                tracing::warn!(terminal = %edge.terminal, node = id, "no action for terminal");
                continue;
            };
            operations.push(Operation {
                name: action.display_name.clone(),
                builder_method: action.builder_method.clone(),
                documentation: action.documentation.clone(),
                kind: operation_kind(action, config),
                target: target(graph, edge.target, config),
            });
        }

        states.push(StateDescriptor {
            name: config.state_name(id),
            node: id,
            operations,
        });
    }

    tracing::debug!(states = states.len(), "synthesized states");
    states
}

fn operation_kind(action: &ActionMetadata, config: &SynthesisConfig) -> OperationKind {
    if action.is_property() {
        return OperationKind::Property;
    }
    let params = action
        .parameters
        .iter()
        .map(|p| ParamDescriptor {
            name: p.name.clone(),
            ty: p.ty.render(&config.dynamic_marker),
        })
        .collect();
    let generics = action
        .generics
        .iter()
        .map(|g| GenericArg {
            rendered: g.render(&config.dynamic_marker),
            declaration: g.declaration(),
        })
        .collect();
    OperationKind::Method { params, generics }
}

fn target(
    graph: &MinimalTransitionGraph,
    node: NodeId,
    config: &SynthesisConfig,
) -> OperationTarget {
    match graph.node(node) {
        Some(n) if !n.is_end() => OperationTarget::State {
            name: config.state_name(node),
            node,
        },
        _ => OperationTarget::End,
    }
}
