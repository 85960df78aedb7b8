//! Shared compile-and-report flow for commands.

use std::path::Path;

use snout_compiler::{CompiledSyntax, Diagnostics, Lowering, SyntaxBuilder};

use super::manifest_loader::{LoadedManifest, load_manifest};

pub fn load_or_exit(manifest: &Path, grammar: Option<&Path>) -> LoadedManifest {
    load_manifest(manifest, grammar).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}

pub fn compile(
    loaded: &LoadedManifest,
    lowering: Lowering,
    prune: bool,
) -> snout_compiler::Result<CompiledSyntax> {
    SyntaxBuilder::new(loaded.grammar(), &loaded.catalog)
        .base_name(&loaded.manifest.syntax)
        .lowering(lowering)
        .prune_unreachable(prune)
        .compile()
}

/// Snippets against the grammar text, labelled with the file it came from.
pub fn render_diagnostics(
    diagnostics: &Diagnostics,
    loaded: &LoadedManifest,
    color: bool,
) -> String {
    diagnostics
        .printer(loaded.grammar())
        .path(&loaded.grammar_origin)
        .colored(color)
        .render()
}

/// Print the error with its diagnostics, then exit.
pub fn fail(err: snout_compiler::Error, loaded: &LoadedManifest, color: bool) -> ! {
    match err.diagnostics() {
        Some(diagnostics) if !diagnostics.is_empty() => {
            eprintln!("{}", render_diagnostics(diagnostics, loaded, color))
        }
        _ => eprintln!("error: {}", err),
    }
    std::process::exit(1);
}

/// Compile, printing warnings. Exits on error.
pub fn compile_or_exit(
    loaded: &LoadedManifest,
    lowering: Lowering,
    prune: bool,
    color: bool,
) -> CompiledSyntax {
    let compiled = compile(loaded, lowering, prune).unwrap_or_else(|e| fail(e, loaded, color));
    if !compiled.diagnostics.is_empty() {
        eprintln!("{}", render_diagnostics(&compiled.diagnostics, loaded, color));
    }
    compiled
}
