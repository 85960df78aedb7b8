use std::path::PathBuf;

use snout_compiler::{CompiledSyntax, GraphPrinter, Lowering, StatePrinter};
use snout_core::Colors;

use super::run_common::{compile_or_exit, load_or_exit};

/// Pipeline stage printed by `snout dump`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    /// Lowered context-free grammar.
    Grammar,
    /// LALR(1) parse table.
    Table,
    /// Transition graph straight from reduce-chain resolution.
    Graph,
    /// Graph after minimization, merged nodes marked.
    Minimal,
    #[default]
    States,
}

pub struct DumpArgs {
    pub manifest: PathBuf,
    pub grammar: Option<PathBuf>,
    pub stage: Stage,
    pub lowering: Lowering,
    pub prune: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let loaded = load_or_exit(&args.manifest, args.grammar.as_deref());
    let compiled = compile_or_exit(&loaded, args.lowering, args.prune, args.color);
    print!("{}", render_stage(&compiled, args.stage, Colors::new(args.color)));
}

pub fn render_stage(compiled: &CompiledSyntax, stage: Stage, colors: Colors) -> String {
    let terminals = compiled.grammar.terminal_names();
    match stage {
        Stage::Grammar => compiled.grammar.dump(),
        Stage::Table => compiled.table.dump(),
        Stage::Graph => GraphPrinter::new(&compiled.graph, terminals)
            .colors(colors)
            .dump(),
        Stage::Minimal => GraphPrinter::minimal(&compiled.minimized, terminals)
            .colors(colors)
            .dump(),
        Stage::States => StatePrinter::new(&compiled.states).colors(colors).dump(),
    }
}
