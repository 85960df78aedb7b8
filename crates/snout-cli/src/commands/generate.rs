use std::fs;
use std::path::PathBuf;

use snout_compiler::{Lowering, RustEmitConfig};

use super::run_common::{compile_or_exit, load_or_exit};

pub struct GenerateArgs {
    pub manifest: PathBuf,
    pub grammar: Option<PathBuf>,
    pub lowering: Lowering,
    pub prune: bool,
    pub visibility: String,
    pub output: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: GenerateArgs) {
    let loaded = load_or_exit(&args.manifest, args.grammar.as_deref());
    let compiled = compile_or_exit(&loaded, args.lowering, args.prune, args.color);

    let config = RustEmitConfig::new(&loaded.manifest.builder).visibility(&args.visibility);
    let code = match compiled.emit_rust(&config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &code) {
                eprintln!("error: failed to write '{}': {}", path.display(), e);
                std::process::exit(1);
            }
            tracing::info!(
                path = %path.display(),
                states = compiled.states.len(),
                "wrote generated states"
            );
        }
        None => print!("{}", code),
    }
}
