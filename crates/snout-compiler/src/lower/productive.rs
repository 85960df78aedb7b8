//! Rules that can finish deriving.
//!
//! A rule is productive when some derivation ends in actions (or nothing)
//! without expanding it forever. `r : x ; x : r ;` has no such derivation.

use crate::analyze::{Ebnf, Expr};
use crate::parser::Repetition;

pub(super) fn productive_rules(ebnf: &Ebnf) -> Vec<bool> {
    let mut known = vec![false; ebnf.rules.len()];
    loop {
        let mut changed = false;
        for (id, rule) in ebnf.rules.iter().enumerate() {
            if !known[id] && derives(&rule.body, &known) {
                known[id] = true;
                changed = true;
            }
        }
        if !changed {
            return known;
        }
    }
}

fn derives(expr: &Expr, known: &[bool]) -> bool {
    match expr {
        Expr::Empty | Expr::Terminal(_) => true,
        Expr::Rule(id) => known[*id],
        Expr::Seq(items) => items.iter().all(|e| derives(e, known)),
        Expr::Alt(branches) => branches.iter().any(|e| derives(e, known)),
        Expr::Repeat(_, Repetition::ZeroOrMore | Repetition::Optional) => true,
        Expr::Repeat(inner, Repetition::OneOrMore) => derives(inner, known),
    }
}
