//! Lowering: EBNF rules → BNF [`Grammar`].
//!
//! Direct left recursion is rewritten into repetition first, and a start rule
//! that can never finish deriving is rejected. Then one of two strategies
//! runs:
//!
//! - [`Lowering::Flatten`] expands rules into a right-linear grammar by
//!   threading each expression's continuation. Every reduction then happens
//!   on end-of-input, so user terminals only ever shift.
//! - [`Lowering::Direct`] keeps one nonterminal per rule and introduces
//!   helper nonterminals for groups and quantifiers.
//!
//! Flattening only works for regular languages. A rule that recurses in
//! non-tail position makes the whole grammar fall back to direct lowering.

mod direct;
mod flatten;
mod left_recursion;
mod productive;


use snout_core::ActionCatalog;

use crate::analyze::Ebnf;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grammar::Grammar;
use crate::{Error, PassResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lowering {
    #[default]
    Flatten,
    Direct,
}

pub fn lower(ebnf: &Ebnf, catalog: &ActionCatalog, lowering: Lowering) -> PassResult<Grammar> {
    let mut diagnostics = Diagnostics::new();
    let mut ebnf = ebnf.clone();

    left_recursion::eliminate(&mut ebnf, &mut diagnostics);
    if diagnostics.has_errors() {
        return Err(Error::InvalidGrammar(diagnostics));
    }

    if !productive::productive_rules(&ebnf)[Ebnf::START] {
        let start = ebnf.rule(Ebnf::START);
        diagnostics
            .report(DiagnosticKind::UnproductiveStart, start.span)
            .message(&start.name)
            .emit();
        return Err(Error::InvalidGrammar(diagnostics));
    }

    let grammar = match lowering {
        Lowering::Direct => direct::lower(&ebnf, catalog),
        Lowering::Flatten => match flatten::lower(&ebnf, catalog) {
            Ok(grammar) => grammar,
            Err(flatten::NotRegular { rule }) => {
                let rule = ebnf.rule(rule);
                diagnostics
                    .report(DiagnosticKind::NonRegularGrammar, rule.span)
                    .message(&rule.name)
                    .emit();
                tracing::debug!(rule = %rule.name, "grammar is not regular, lowering directly");
                direct::lower(&ebnf, catalog)
            }
        },
    };

    tracing::debug!(
        ?lowering,
        nonterminals = grammar.nonterminal_count(),
        productions = grammar.productions().len(),
        "lowered grammar"
    );
    Ok((grammar, diagnostics))
}
