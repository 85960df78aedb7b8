//! Tests for CLI dispatch logic: params extraction and defaults.

use std::path::PathBuf;

use snout_compiler::Lowering;

use super::*;
use crate::cli::commands::{check_command, dump_command, generate_command};
use crate::commands::dump::Stage;

#[test]
fn check_defaults() {
    let m = check_command()
        .try_get_matches_from(["check", "shape.json"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.manifest, PathBuf::from("shape.json"));
    assert_eq!(params.grammar, None);
    assert_eq!(params.lowering, Lowering::Flatten);
    assert!(!params.strict);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn check_flags() {
    let m = check_command()
        .try_get_matches_from([
            "check",
            "shape.json",
            "-g",
            "shape.snout",
            "--strict",
            "--direct",
            "--color",
            "never",
        ])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.grammar, Some(PathBuf::from("shape.snout")));
    assert_eq!(params.lowering, Lowering::Direct);
    assert!(params.strict);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn manifest_is_required() {
    let result = check_command().try_get_matches_from(["check"]);
    assert!(result.is_err());
}

#[test]
fn dump_stage_defaults_to_states() {
    let m = dump_command()
        .try_get_matches_from(["dump", "shape.json"])
        .unwrap();
    assert_eq!(DumpParams::from_matches(&m).stage, Stage::States);
}

#[test]
fn dump_stages() {
    let cases = [
        ("grammar", Stage::Grammar),
        ("table", Stage::Table),
        ("graph", Stage::Graph),
        ("minimal", Stage::Minimal),
        ("states", Stage::States),
    ];
    for (name, stage) in cases {
        let m = dump_command()
            .try_get_matches_from(["dump", "shape.json", "--stage", name])
            .unwrap();
        assert_eq!(DumpParams::from_matches(&m).stage, stage, "--stage {name}");
    }
}

#[test]
fn dump_rejects_unknown_stage() {
    let result = dump_command().try_get_matches_from(["dump", "shape.json", "--stage", "bytecode"]);
    assert!(result.is_err());
}

#[test]
fn generate_flags() {
    let m = generate_command()
        .try_get_matches_from([
            "generate",
            "shape.json",
            "-o",
            "shape.rs",
            "--prune",
            "--vis",
            "pub(crate)",
            "--color",
            "always",
        ])
        .unwrap();
    let params = GenerateParams::from_matches(&m);

    assert_eq!(params.output, Some(PathBuf::from("shape.rs")));
    assert!(params.prune);
    assert_eq!(params.visibility, "pub(crate)");
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn generate_defaults() {
    let m = generate_command()
        .try_get_matches_from(["generate", "-"])
        .unwrap();
    let params = GenerateParams::from_matches(&m);

    assert_eq!(params.manifest, PathBuf::from("-"));
    assert_eq!(params.output, None);
    assert!(!params.prune);
    assert_eq!(params.visibility, "pub");
}

#[test]
fn verbose_is_global() {
    let m = build_cli()
        .try_get_matches_from(["snout", "dump", "shape.json", "-vv"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 2);
    assert_eq!(m.subcommand_name(), Some("dump"));
}

#[test]
fn color_choice_overrides_terminal_detection() {
    assert!(ColorChoice::Always.should_colorize());
    assert!(!ColorChoice::Never.should_colorize());
}
