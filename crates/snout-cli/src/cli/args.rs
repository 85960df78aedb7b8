//! Argument definitions shared between subcommands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Manifest file (positional).
pub fn manifest_arg() -> Arg {
    Arg::new("manifest")
        .value_name("MANIFEST")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON manifest with the builder's actions, or - for stdin")
}

/// Grammar file overriding the manifest's grammar (-g/--grammar).
pub fn grammar_arg() -> Arg {
    Arg::new("grammar")
        .short('g')
        .long("grammar")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Read the grammar from a file instead of the manifest")
}

pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("When to use colors: auto, always or never")
}

/// `--strict`: warnings fail `check`.
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Exit with an error when the grammar has warnings")
}

pub fn stage_arg() -> Arg {
    Arg::new("stage")
        .long("stage")
        .value_name("STAGE")
        .default_value("states")
        .value_parser(["grammar", "table", "graph", "minimal", "states"])
        .help("Stage to print")
}

/// Lower rules one nonterminal each (--direct).
pub fn direct_arg() -> Arg {
    Arg::new("direct")
        .long("direct")
        .action(ArgAction::SetTrue)
        .help("Lower rules directly instead of flattening them into chains")
}

/// Drop states the entry cannot reach (--prune).
pub fn prune_arg() -> Arg {
    Arg::new("prune")
        .long("prune")
        .action(ArgAction::SetTrue)
        .help("Skip states unreachable from the entry state")
}

/// Visibility of generated items (--vis).
pub fn visibility_arg() -> Arg {
    Arg::new("visibility")
        .long("vis")
        .value_name("VIS")
        .default_value("pub")
        .help("Visibility of generated items (empty for private)")
}

pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write generated code here instead of stdout")
}

pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .global(true)
        .action(ArgAction::Count)
        .help("Verbosity level (-v for stage summaries, -vv for debug logs)")
}
