use indoc::indoc;
use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn kind_messages() {
    assert_eq!(DiagnosticKind::UndefinedSymbol.message(None), "undefined symbol");
    assert_eq!(
        DiagnosticKind::UndefinedSymbol.message(Some("Unknown")),
        "`Unknown` is neither an action nor a rule"
    );
    assert_eq!(
        DiagnosticKind::UnclosedGroup.message(Some("in rule `s`")),
        "missing closing `)`; in rule `s`"
    );
    assert_eq!(
        DiagnosticKind::GrammarConflict.message(Some("shift/reduce conflict on `A`")),
        "grammar is ambiguous: shift/reduce conflict on `A`"
    );
}

#[test]
fn severities() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnusedRule, range(8, 9))
        .message("b")
        .emit();
    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());

    diagnostics
        .report(DiagnosticKind::DuplicateRule, range(0, 1))
        .message("a")
        .emit();
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(
        diagnostics.kinds().collect::<Vec<_>>(),
        [DiagnosticKind::UnusedRule, DiagnosticKind::DuplicateRule]
    );
    assert!(diagnostics.contains(DiagnosticKind::DuplicateRule));
    assert!(!diagnostics.contains(DiagnosticKind::EmptyGrammar));
}

#[test]
fn builder_without_emit_records_nothing() {
    let mut diagnostics = Diagnostics::new();
    let _ = diagnostics.report(DiagnosticKind::EmptyGrammar, range(0, 0));
    assert!(diagnostics.is_empty());
}

#[test]
fn display_lists_related_locations() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedSemicolon, TextRange::empty(5.into()))
        .related_to("started here", range(0, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(6, 7))
        .emit();

    insta::assert_snapshot!(diagnostics.to_string(), @r"
    error at 5..5: expected `;` after rule body (related: started here at 0..1)
    error at 6..7: unexpected token
    ");
}

#[test]
fn render_snippet() {
    let source = "s : A Unknown ;";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedSymbol, range(6, 13))
        .message("Unknown")
        .emit();

    insta::assert_snapshot!(diagnostics.render(source), @r"
    error: `Unknown` is neither an action nor a rule
      |
    1 | s : A Unknown ;
      |       ^^^^^^^ `Unknown` is neither an action nor a rule
    ");
}

#[test]
fn render_warning_with_path() {
    let source = "Done : A ;";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ShadowedAction, range(0, 4))
        .message("Done")
        .emit();

    insta::assert_snapshot!(diagnostics.printer(source).path("shape.snout").render(), @r"
    warning: rule `Done` shadows the action of the same name
     --> shape.snout:1:1
      |
    1 | Done : A ;
      | ^^^^ rule `Done` shadows the action of the same name
    ");
}

#[test]
fn render_related_label() {
    let source = "s : A ;\ns : B ;";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateRule, range(0, 1))
        .message("s")
        .related_to("defined again here", range(8, 9))
        .emit();

    let out = diagnostics.render(source);
    assert!(out.starts_with("error: `s` is already defined\n"));
    assert!(out.contains("1 | s : A ;\n"));
    assert!(out.contains("2 | s : B ;\n"));
    assert!(out.contains("- defined again here"));
}

#[test]
fn render_several() {
    let source = "s : X Y ;";
    let mut diagnostics = Diagnostics::new();
    for (name, start) in [("X", 4), ("Y", 6)] {
        diagnostics
            .report(DiagnosticKind::UndefinedSymbol, range(start, start + 1))
            .message(name)
            .emit();
    }

    let expected = indoc! {"
        error: `X` is neither an action nor a rule
          |
        1 | s : X Y ;
          |     ^ `X` is neither an action nor a rule
        error: `Y` is neither an action nor a rule
          |
        1 | s : X Y ;
          |       ^ `Y` is neither an action nor a rule
    "};
    assert_eq!(diagnostics.render(source).trim_end(), expected.trim_end());
}

#[test]
fn render_colored_and_empty() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.render("s : A ;").is_empty());

    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(0, 1))
        .emit();
    let colored = diagnostics.render_colored("# : A ;", true);
    assert!(colored.contains("unexpected token"));
    assert!(colored.contains('\x1b'));
}
