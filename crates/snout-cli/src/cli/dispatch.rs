//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use snout_compiler::Lowering;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::{DumpArgs, Stage};
use crate::commands::generate::GenerateArgs;

pub struct CheckParams {
    pub manifest: PathBuf,
    pub grammar: Option<PathBuf>,
    pub lowering: Lowering,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            manifest: manifest_path(m),
            grammar: m.get_one::<PathBuf>("grammar").cloned(),
            lowering: parse_lowering(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            manifest: p.manifest,
            grammar: p.grammar,
            lowering: p.lowering,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub manifest: PathBuf,
    pub grammar: Option<PathBuf>,
    pub stage: Stage,
    pub lowering: Lowering,
    pub prune: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            manifest: manifest_path(m),
            grammar: m.get_one::<PathBuf>("grammar").cloned(),
            stage: parse_stage(m),
            lowering: parse_lowering(m),
            prune: m.get_flag("prune"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            manifest: p.manifest,
            grammar: p.grammar,
            stage: p.stage,
            lowering: p.lowering,
            prune: p.prune,
            color: p.color.should_colorize(),
        }
    }
}

pub struct GenerateParams {
    pub manifest: PathBuf,
    pub grammar: Option<PathBuf>,
    pub lowering: Lowering,
    pub prune: bool,
    pub visibility: String,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            manifest: manifest_path(m),
            grammar: m.get_one::<PathBuf>("grammar").cloned(),
            lowering: parse_lowering(m),
            prune: m.get_flag("prune"),
            visibility: m
                .get_one::<String>("visibility")
                .cloned()
                .unwrap_or_else(|| "pub".to_string()),
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            manifest: p.manifest,
            grammar: p.grammar,
            lowering: p.lowering,
            prune: p.prune,
            visibility: p.visibility,
            output: p.output,
            color: p.color.should_colorize(),
        }
    }
}

fn manifest_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("manifest")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_lowering(m: &ArgMatches) -> Lowering {
    if m.get_flag("direct") {
        Lowering::Direct
    } else {
        Lowering::Flatten
    }
}

fn parse_stage(m: &ArgMatches) -> Stage {
    match m.get_one::<String>("stage").map(|s| s.as_str()) {
        Some("grammar") => Stage::Grammar,
        Some("table") => Stage::Table,
        Some("graph") => Stage::Graph,
        Some("minimal") => Stage::Minimal,
        _ => Stage::States,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
