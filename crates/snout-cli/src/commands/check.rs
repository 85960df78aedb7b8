use std::path::PathBuf;

use snout_compiler::Lowering;

use super::run_common::{compile, fail, load_or_exit, render_diagnostics};

pub struct CheckArgs {
    pub manifest: PathBuf,
    pub grammar: Option<PathBuf>,
    pub lowering: Lowering,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let loaded = load_or_exit(&args.manifest, args.grammar.as_deref());

    if loaded.grammar().trim().is_empty() {
        eprintln!("error: grammar cannot be empty");
        std::process::exit(1);
    }

    let compiled =
        compile(&loaded, args.lowering, false).unwrap_or_else(|e| fail(e, &loaded, args.color));

    let diagnostics = &compiled.diagnostics;
    if !diagnostics.is_empty() {
        eprintln!("{}", render_diagnostics(diagnostics, &loaded, args.color));
    }
    if args.strict && diagnostics.has_warnings() {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
