//! Rewrites direct left recursion into repetition.
//!
//! `R : R a | R b | c | d` becomes `R : (c | d) (a | b)*`. A branch that is
//! just `R` derives nothing new and is dropped.

use crate::analyze::{Ebnf, Expr, RuleId};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::Repetition;

pub(super) fn eliminate(ebnf: &mut Ebnf, diagnostics: &mut Diagnostics) {
    for id in 0..ebnf.rules.len() {
        let rule = &ebnf.rules[id];
        let Some(body) = rewrite(id, &rule.body) else {
            continue;
        };
        match body {
            Some(body) => {
                tracing::trace!(rule = %rule.name, "removed left recursion");
                ebnf.rules[id].body = body;
            }
            None => {
                diagnostics
                    .report(DiagnosticKind::LeftRecursionNoBase, rule.span)
                    .message(&rule.name)
                    .emit();
            }
        }
    }
}

/// `None` when the rule is not left recursive, `Some(None)` when every
/// branch is.
fn rewrite(id: RuleId, body: &Expr) -> Option<Option<Expr>> {
    let mut bases = Vec::new();
    let mut tails = Vec::new();
    let mut recursive = false;

    for branch in body.branches() {
        match split_head(id, branch) {
            Some(tail) => {
                recursive = true;
                tails.extend(tail);
            }
            None => bases.push(branch.clone()),
        }
    }

    if !recursive {
        return None;
    }
    if bases.is_empty() {
        return Some(None);
    }

    let base = alternation(bases);
    if tails.is_empty() {
        return Some(Some(base));
    }
    let tail = Expr::repeat(alternation(tails), Repetition::ZeroOrMore);
    Some(Some(Expr::Seq(vec![base, tail])))
}

/// For a branch starting with a reference to `id`, the rest of the branch.
fn split_head(id: RuleId, branch: &Expr) -> Option<Option<Expr>> {
    match branch {
        Expr::Rule(r) if *r == id => Some(None),
        Expr::Seq(items) if items.first() == Some(&Expr::Rule(id)) => {
            let rest = &items[1..];
            Some(Some(match rest {
                [single] => single.clone(),
                _ => Expr::Seq(rest.to_vec()),
            }))
        }
        _ => None,
    }
}

fn alternation(mut branches: Vec<Expr>) -> Expr {
    if branches.len() == 1 {
        return branches.remove(0);
    }
    Expr::Alt(branches)
}
