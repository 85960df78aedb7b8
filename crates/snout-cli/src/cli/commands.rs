//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("snout")
        .about("Typed fluent interfaces from grammars over builder actions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(generate_command())
}

/// Validate a manifest and its grammar.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a manifest and its grammar")
        .after_help(
            r#"EXAMPLES:
  snout check shape.json                 # validate, silent on success
  snout check shape.json -g shape.snout  # grammar from a separate file
  snout check shape.json --strict        # fail on warnings too"#,
        )
        .arg(manifest_arg())
        .arg(grammar_arg())
        .arg(direct_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Print an intermediate stage.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Print an intermediate compilation stage")
        .after_help(
            r#"EXAMPLES:
  snout dump shape.json                  # state descriptors
  snout dump shape.json --stage table    # LALR(1) table
  snout dump shape.json --stage minimal  # minimized transition graph"#,
        )
        .arg(manifest_arg())
        .arg(grammar_arg())
        .arg(stage_arg())
        .arg(direct_arg())
        .arg(prune_arg())
        .arg(color_arg())
}

/// Generate Rust state types.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate Rust state types")
        .after_help(
            r#"EXAMPLES:
  snout generate shape.json              # print to stdout
  snout generate shape.json -o shape.rs  # write to a file
  snout generate shape.json --prune      # only states reachable from the entry"#,
        )
        .arg(manifest_arg())
        .arg(grammar_arg())
        .arg(direct_arg())
        .arg(prune_arg())
        .arg(visibility_arg())
        .arg(output_file_arg())
        .arg(color_arg())
}
