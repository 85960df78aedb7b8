use snout_core::ActionCatalog;

use crate::diagnostics::DiagnosticKind;
use crate::emit::RustEmitConfig;
use crate::lower::Lowering;
use crate::pipeline::{CompiledSyntax, SyntaxBuilder, compile_batch};
use crate::synthesize::{OperationTarget, StateDescriptor};
use crate::test_utils::{SHAPE_GRAMMAR, catalog, shape_catalog};
use crate::{Error, Result};

#[track_caller]
fn compile(source: &str, catalog: &ActionCatalog) -> CompiledSyntax {
    match SyntaxBuilder::new(source, catalog).compile() {
        Ok(compiled) => compiled,
        Err(err) => panic!("compilation failed: {err}\n{:?}", err.diagnostics()),
    }
}

fn operation_names(state: &StateDescriptor) -> Vec<&str> {
    state.operations.iter().map(|op| op.name.as_str()).collect()
}

/// Follow operation `name` from `state`. `None` when it ends the chain.
#[track_caller]
fn step<'a>(
    compiled: &'a CompiledSyntax,
    state: &StateDescriptor,
    name: &str,
) -> Option<&'a StateDescriptor> {
    let op = state
        .operations
        .iter()
        .find(|op| op.name == name)
        .unwrap_or_else(|| panic!("{} has no operation {name}", state.name));
    match &op.target {
        OperationTarget::State { name, .. } => {
            Some(compiled.state(name).expect("target state exists"))
        }
        OperationTarget::End => None,
    }
}

#[test]
fn shape_grammar() {
    let catalog = shape_catalog();
    let compiled = compile(SHAPE_GRAMMAR, &catalog);
    let entry = compiled.entry().unwrap();

    assert_eq!(entry.name, "Syntax");
    assert_eq!(operation_names(entry), ["AddCircle", "AddRectangle", "AddPolygon"]);

    let circle = step(&compiled, entry, "AddCircle").unwrap();
    assert_eq!(operation_names(circle), ["WithRadius"]);
    assert!(step(&compiled, circle, "WithRadius").is_none());

    let rectangle = step(&compiled, entry, "AddRectangle").unwrap();
    assert_eq!(operation_names(rectangle), ["WithWidth"]);
    let width = step(&compiled, rectangle, "WithWidth").unwrap();
    assert_eq!(operation_names(width), ["WithHeight"]);
    assert!(step(&compiled, width, "WithHeight").is_none());

    let polygon = step(&compiled, entry, "AddPolygon").unwrap();
    assert_eq!(operation_names(polygon), ["AddPoint"]);
    let point = step(&compiled, polygon, "AddPoint").unwrap();
    assert_eq!(point.name, polygon.name);

    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn repetition_chains_to_itself() {
    let catalog = catalog(&["A", "B"]);
    let compiled = compile("rule : A B+ ;", &catalog);
    let entry = compiled.entry().unwrap();

    assert_eq!(operation_names(entry), ["A"]);
    let after_a = step(&compiled, entry, "A").unwrap();
    assert_eq!(operation_names(after_a), ["B"]);
    let after_b = step(&compiled, after_a, "B").unwrap();
    assert_eq!(after_b.name, after_a.name);
}

#[test]
fn bare_expression_grammar() {
    let catalog = catalog(&["A", "B", "C"]);
    let compiled = compile("(A | B)* C", &catalog);
    let entry = compiled.entry().unwrap();

    assert_eq!(compiled.states.len(), 1);
    assert_eq!(operation_names(entry), ["A", "B", "C"]);
    assert_eq!(step(&compiled, entry, "A").unwrap().name, "Syntax");
    assert_eq!(step(&compiled, entry, "B").unwrap().name, "Syntax");
    assert!(step(&compiled, entry, "C").is_none());
}

#[test]
fn left_recursive_list() {
    let catalog = catalog(&["Item"]);
    let compiled = compile("list : list Item | Item ;", &catalog);
    let entry = compiled.entry().unwrap();

    assert_eq!(compiled.states.len(), 1);
    assert_eq!(step(&compiled, entry, "Item").unwrap().name, "Syntax");
}

#[test]
fn direct_lowering() {
    let catalog = catalog(&["A", "B"]);
    let compiled = SyntaxBuilder::new("s : A B ;", &catalog)
        .lowering(Lowering::Direct)
        .compile()
        .unwrap();
    let entry = compiled.entry().unwrap();

    let after_a = step(&compiled, entry, "A").unwrap();
    assert_eq!(operation_names(after_a), ["B"]);
    assert!(step(&compiled, after_a, "B").is_none());
}

#[test]
fn non_regular_grammar_still_compiles() {
    let catalog = catalog(&["A", "B", "C"]);
    let compiled = compile("s : A s B | C ;", &catalog);

    assert!(compiled.diagnostics.contains(DiagnosticKind::NonRegularGrammar));
    assert_eq!(operation_names(compiled.entry().unwrap()), ["A", "C"]);
}

#[test]
fn undefined_symbol() {
    let catalog = catalog(&["A"]);
    let err = SyntaxBuilder::new("s : A Unknown ;", &catalog).compile().unwrap_err();

    assert!(matches!(&err, Error::UndefinedSymbol { name, .. } if name == "Unknown"));
    assert_eq!(err.to_string(), "undefined symbol `Unknown`");
}

#[test]
fn syntax_error() {
    let catalog = catalog(&["A"]);
    let err = SyntaxBuilder::new("s : (A ;", &catalog).compile().unwrap_err();

    let Error::GrammarSyntax(diagnostics) = &err else {
        panic!("expected GrammarSyntax, got {err:?}");
    };
    assert!(diagnostics.contains(DiagnosticKind::UnclosedGroup));
}

#[test]
fn unproductive_grammar_is_rejected() {
    let catalog = catalog(&["A"]);
    let err = SyntaxBuilder::new("r : x ; x : y ; y : x ;", &catalog)
        .compile()
        .unwrap_err();

    let Error::InvalidGrammar(diagnostics) = &err else {
        panic!("expected InvalidGrammar, got {err:?}");
    };
    assert!(diagnostics.contains(DiagnosticKind::UnproductiveStart));
}

#[test]
fn recursion_limit() {
    let catalog = catalog(&["A"]);
    let err = SyntaxBuilder::new("s : ((((A)))) ;", &catalog)
        .recursion_limit(2)
        .compile()
        .unwrap_err();
    assert!(matches!(err, Error::RecursionLimitExceeded));
}

#[test]
fn warnings_are_kept() {
    let catalog = catalog(&["A", "B"]);
    let compiled = compile("s : A ; unused : B ;", &catalog);

    assert!(compiled.diagnostics.contains(DiagnosticKind::UnusedRule));
    assert!(!compiled.diagnostics.has_errors());
}

#[test]
fn errors_carry_earlier_warnings() {
    let catalog = catalog(&["A"]);
    let err = SyntaxBuilder::new("s : A ; e : e A ;", &catalog).compile().unwrap_err();

    let Error::InvalidGrammar(diagnostics) = &err else {
        panic!("expected InvalidGrammar, got {err:?}");
    };
    assert_eq!(
        diagnostics.kinds().collect::<Vec<_>>(),
        [DiagnosticKind::UnusedRule, DiagnosticKind::LeftRecursionNoBase]
    );
}

#[test]
fn compilation_is_deterministic() {
    let catalog = shape_catalog();
    let config = RustEmitConfig::new("ShapeBuilder");

    let first = compile(SHAPE_GRAMMAR, &catalog);
    let second = compile(SHAPE_GRAMMAR, &catalog);

    assert_eq!(first.minimized, second.minimized);
    assert_eq!(first.states, second.states);
    assert_eq!(first.emit_rust(&config).unwrap(), second.emit_rust(&config).unwrap());
}

#[test]
fn emits_rust() {
    let catalog = shape_catalog();
    let compiled = SyntaxBuilder::new(SHAPE_GRAMMAR, &catalog)
        .base_name("Shape")
        .compile()
        .unwrap();

    let code = compiled.emit_rust(&RustEmitConfig::new("ShapeBuilder")).unwrap();

    assert!(code.starts_with("// @generated by snout. Do not edit.\n"));
    assert!(code.contains("pub struct Shape<'b> {"));
    assert!(code.contains("pub fn new(builder: &'b mut ShapeBuilder) -> Self {"));
    assert!(code.contains("/// Add a circle\n"));
    assert!(code.contains("self.builder.set_circle_radius(radius);"));
}

#[test]
fn batch_isolates_failures() {
    let catalog = catalog(&["A"]);
    let results: Vec<Result<CompiledSyntax>> = compile_batch([
        SyntaxBuilder::new("s : A ;", &catalog),
        SyntaxBuilder::new("s : Missing ;", &catalog),
        SyntaxBuilder::new("A A", &catalog),
    ]);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::UndefinedSymbol { .. })));
    assert!(results[2].is_ok());
}
