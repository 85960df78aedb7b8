#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiler from grammars over builder actions to fluent state machines.
//!
//! Pipeline: `parser` → `analyze` → `lower` → `lalr` → `graph` → `synthesize` → `emit`.
//!
//! The grammar is parsed into a lossless CST, identifiers are resolved
//! against an [`ActionCatalog`](snout_core::ActionCatalog), and the resolved
//! rules are lowered to BNF and compiled into an LALR(1) parse table. The
//! table is resolved into a transition graph over actions, minimized, and
//! finally turned into state descriptors that emitters render as code.

pub mod analyze;
pub mod diagnostics;
pub mod emit;
pub mod grammar;
pub mod graph;
pub mod lalr;
pub mod lower;
pub mod parser;
pub mod pipeline;
pub mod synthesize;
pub mod table;

#[cfg(test)]
mod pipeline_tests;
#[cfg(test)]
mod test_utils;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use emit::{EmitError, RustEmitConfig, emit_rust};
pub use grammar::{Grammar, NonterminalId, Symbol};
pub use graph::{GraphPrinter, MinimalTransitionGraph, MinimizeStats, NodeId, TransitionGraph};
pub use lower::Lowering;
pub use pipeline::{CompiledSyntax, SyntaxBuilder, compile_batch};
pub use synthesize::{StateDescriptor, StatePrinter, SynthesisConfig, synthesize};
pub use table::{Action, ParseTable, ReductionRule, RuleId, StateId};

use snout_core::CatalogError;

/// Errors from compilation.
///
/// Variants carrying [`Diagnostics`] hold everything reported up to the
/// failing pass, including warnings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("grammar nesting exceeds the recursion limit")]
    RecursionLimitExceeded,

    #[error("grammar has syntax errors")]
    GrammarSyntax(Diagnostics),

    #[error("undefined symbol `{name}`")]
    UndefinedSymbol { name: String, diagnostics: Diagnostics },

    #[error("invalid grammar")]
    InvalidGrammar(Diagnostics),

    #[error("grammar has parse table conflicts")]
    GrammarConflict(Diagnostics),

    #[error("reduce chain from state {state} on `{terminal}` exceeds {bound} steps")]
    MalformedAutomaton {
        state: u32,
        terminal: String,
        bound: usize,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl Error {
    /// Diagnostics attached to the error, if any.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::GrammarSyntax(d) | Self::InvalidGrammar(d) | Self::GrammarConflict(d) => Some(d),
            Self::UndefinedSymbol { diagnostics, .. } => Some(diagnostics),
            Self::RecursionLimitExceeded | Self::MalformedAutomaton { .. } | Self::Catalog(_) => {
                None
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Result of a single pass: the output plus non-fatal diagnostics.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;
