//! Productions of the grammar language.
//!
//! ```text
//! root   := rule* | alt
//! rule   := Id ':' alt ';'
//! alt    := branch ('|' branch)*
//! branch := atom*
//! atom   := (Id | '(' alt ')') ('*' | '+' | '?')*
//! ```
//!
//! A source that does not open with `Id ':'` is a single bare expression.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{ATOM_START, BRANCH_END, QUANTIFIERS};

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start(SyntaxKind::Root);
        if self.at_rule_start() {
            while !self.done() {
                if self.at_rule_start() {
                    self.rule();
                } else {
                    self.skip_to_next_rule();
                }
            }
        } else if !self.done() {
            self.alt();
            while !self.done() {
                self.error(DiagnosticKind::UnexpectedToken, None);
                self.bump_error();
            }
        }
        self.attach_trailing_trivia();
        self.finish_node();
    }

    /// One report, then everything up to the next `Id ':'` goes into an `Error` node.
    fn skip_to_next_rule(&mut self) {
        let kind = if self.at(SyntaxKind::Id) {
            DiagnosticKind::ExpectedColon
        } else {
            DiagnosticKind::ExpectedRuleName
        };
        self.error(kind, None);

        self.start(SyntaxKind::Error);
        while !self.done() && !self.at_rule_start() {
            self.bump();
        }
        self.finish_node();
    }

    fn rule(&mut self) {
        self.start(SyntaxKind::Rule);
        let name = self.span();
        self.bump();
        self.eat(SyntaxKind::Colon);
        self.alt();
        if !self.eat(SyntaxKind::Semicolon) {
            self.missing(DiagnosticKind::ExpectedSemicolon, name);
        }
        self.finish_node();
    }

    fn alt(&mut self) {
        self.start(SyntaxKind::Alt);
        self.branch();
        while self.eat(SyntaxKind::Pipe) {
            self.branch();
        }
        self.finish_node();
    }

    fn branch(&mut self) {
        self.start(SyntaxKind::Branch);
        while !self.done() && !self.at_any(BRANCH_END) && !self.at_rule_start() {
            if self.at_any(ATOM_START) {
                self.atom();
            } else if self.at_any(QUANTIFIERS) {
                self.error(
                    DiagnosticKind::ExpectedExpression,
                    Some("quantifier has nothing to repeat"),
                );
                self.bump_error();
            } else {
                self.error(DiagnosticKind::UnexpectedToken, None);
                self.bump_error();
            }
        }
        self.finish_node();
    }

    fn atom(&mut self) {
        let checkpoint = self.checkpoint();
        if self.at(SyntaxKind::ParenOpen) {
            self.group();
        } else {
            self.start(SyntaxKind::Ref);
            self.bump();
            self.finish_node();
        }

        while self.at_any(QUANTIFIERS) {
            self.start_at(checkpoint, SyntaxKind::Quantifier);
            self.bump();
            self.finish_node();
        }
    }

    fn group(&mut self) {
        if !self.enter_group() {
            // Abandoned: swallow the rest so the tree still covers the source.
            self.start(SyntaxKind::Error);
            while !self.at_eof() {
                self.bump();
            }
            self.finish_node();
            return;
        }

        let open = self.span();
        self.start(SyntaxKind::Group);
        self.bump();
        self.alt();
        if !self.eat(SyntaxKind::ParenClose) {
            self.unclosed(DiagnosticKind::UnclosedGroup, open);
        }
        self.finish_node();
        self.leave_group();
    }
}
