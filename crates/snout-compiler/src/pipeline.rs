//! Compilation facade: grammar text + catalog → every intermediate artifact.
//!
//! ```ignore
//! let compiled = SyntaxBuilder::new("shape : AddCircle WithRadius ;", &catalog)
//!     .base_name("Shape")
//!     .compile()?;
//! let code = compiled.emit_rust(&RustEmitConfig::new("ShapeBuilder"))?;
//! ```

use snout_core::{ActionCatalog, TerminalId};

use crate::analyze::analyze;
use crate::diagnostics::Diagnostics;
use crate::emit::{EmitError, RustEmitConfig, emit_rust};
use crate::grammar::Grammar;
use crate::graph::{MinimalTransitionGraph, MinimizeStats, TransitionGraph, minimize, resolve};
use crate::lalr;
use crate::lower::{Lowering, lower};
use crate::parser::{DEFAULT_RECURSION_LIMIT, parse_with_limit};
use crate::synthesize::{StateDescriptor, SynthesisConfig, synthesize};
use crate::table::ParseTable;
use crate::{Error, Result};

/// Builder for a single compilation.
#[derive(Clone, Debug)]
pub struct SyntaxBuilder<'a> {
    source: &'a str,
    catalog: &'a ActionCatalog,
    synthesis: SynthesisConfig,
    lowering: Lowering,
    recursion_limit: u32,
}

impl<'a> SyntaxBuilder<'a> {
    pub fn new(source: &'a str, catalog: &'a ActionCatalog) -> Self {
        Self {
            source,
            catalog,
            synthesis: SynthesisConfig::default(),
            lowering: Lowering::default(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    pub fn base_name(mut self, name: impl Into<String>) -> Self {
        self.synthesis = self.synthesis.base_name(name);
        self
    }

    pub fn dynamic_marker(mut self, marker: impl Into<String>) -> Self {
        self.synthesis = self.synthesis.dynamic_marker(marker);
        self
    }

    pub fn prune_unreachable(mut self, value: bool) -> Self {
        self.synthesis = self.synthesis.prune_unreachable(value);
        self
    }

    pub fn lowering(mut self, lowering: Lowering) -> Self {
        self.lowering = lowering;
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Run every stage in order.
    pub fn compile(&self) -> Result<CompiledSyntax> {
        let _span = tracing::debug_span!("compile", base = %self.synthesis.state_name(0)).entered();

        let (parse, diagnostics) = parse_with_limit(self.source, self.recursion_limit)?;
        if diagnostics.has_errors() {
            return Err(Error::GrammarSyntax(diagnostics));
        }

        let (ebnf, analyzed) =
            analyze(&parse.root(), self.catalog).map_err(|e| carry(&diagnostics, e))?;
        let mut diagnostics = merged(&diagnostics, analyzed);

        let (grammar, lowered) =
            lower(&ebnf, self.catalog, self.lowering).map_err(|e| carry(&diagnostics, e))?;
        diagnostics.extend(lowered);

        let (table, built) = lalr::build(&grammar).map_err(|e| carry(&diagnostics, e))?;
        diagnostics.extend(built);

        let terminals: Vec<TerminalId> = self.catalog.terminals().collect();
        let graph = resolve(&table, &terminals).map_err(|e| Error::MalformedAutomaton {
            state: e.state,
            terminal: grammar.terminal_name(e.terminal).to_string(),
            bound: e.bound,
        })?;

        let (minimized, stats) = minimize(&graph);
        let states = synthesize(&minimized, self.catalog, &self.synthesis);

        tracing::info!(
            states = states.len(),
            warnings = diagnostics.warning_count(),
            "compiled syntax"
        );
        Ok(CompiledSyntax {
            grammar,
            table,
            graph,
            minimized,
            stats,
            states,
            diagnostics,
        })
    }
}

/// Every artifact of a successful compilation.
#[derive(Clone, Debug)]
pub struct CompiledSyntax {
    pub grammar: Grammar,
    pub table: ParseTable,
    pub graph: TransitionGraph,
    pub minimized: MinimalTransitionGraph,
    pub stats: MinimizeStats,
    pub states: Vec<StateDescriptor>,
    /// Warnings from all stages.
    pub diagnostics: Diagnostics,
}

impl CompiledSyntax {
    pub fn emit_rust(&self, config: &RustEmitConfig) -> std::result::Result<String, EmitError> {
        emit_rust(&self.states, config)
    }

    pub fn entry(&self) -> Option<&StateDescriptor> {
        self.states.iter().find(|s| s.is_entry())
    }

    pub fn state(&self, name: &str) -> Option<&StateDescriptor> {
        self.states.iter().find(|s| s.name == name)
    }
}

/// Compile independent inputs. A failure only affects its own result.
pub fn compile_batch<'a>(
    builders: impl IntoIterator<Item = SyntaxBuilder<'a>>,
) -> Vec<Result<CompiledSyntax>> {
    builders.into_iter().map(|b| b.compile()).collect()
}

fn merged(earlier: &Diagnostics, later: Diagnostics) -> Diagnostics {
    let mut all = earlier.clone();
    all.extend(later);
    all
}

/// Prefix an error's diagnostics with what earlier stages reported.
fn carry(earlier: &Diagnostics, err: Error) -> Error {
    if earlier.is_empty() {
        return err;
    }
    match err {
        Error::GrammarSyntax(d) => Error::GrammarSyntax(merged(earlier, d)),
        Error::InvalidGrammar(d) => Error::InvalidGrammar(merged(earlier, d)),
        Error::GrammarConflict(d) => Error::GrammarConflict(merged(earlier, d)),
        Error::UndefinedSymbol { name, diagnostics } => Error::UndefinedSymbol {
            name,
            diagnostics: merged(earlier, diagnostics),
        },
        other => other,
    }
}
