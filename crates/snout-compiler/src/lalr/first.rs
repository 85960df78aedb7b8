//! FIRST sets and nullability, computed to a fixpoint.

use std::collections::BTreeSet;

use snout_core::TerminalId;

use crate::grammar::{Grammar, Symbol};

pub(super) struct FirstSets {
    first: Vec<BTreeSet<TerminalId>>,
    nullable: Vec<bool>,
}

impl FirstSets {
    pub(super) fn compute(grammar: &Grammar) -> Self {
        let count = grammar.nonterminal_count();
        let mut sets = Self {
            first: vec![BTreeSet::new(); count],
            nullable: vec![false; count],
        };

        let mut changed = true;
        while changed {
            changed = false;
            for production in grammar.productions() {
                let lhs = production.lhs.index();
                let (first, nullable) = sets.of_sequence(&production.rhs);

                let before = sets.first[lhs].len();
                sets.first[lhs].extend(first);
                changed |= sets.first[lhs].len() != before;

                if nullable && !sets.nullable[lhs] {
                    sets.nullable[lhs] = true;
                    changed = true;
                }
            }
        }
        sets
    }

    /// FIRST of a symbol string, and whether it can derive ε.
    pub(super) fn of_sequence(&self, symbols: &[Symbol]) -> (BTreeSet<TerminalId>, bool) {
        let mut out = BTreeSet::new();
        for symbol in symbols {
            match *symbol {
                Symbol::Terminal(t) => {
                    out.insert(t);
                    return (out, false);
                }
                Symbol::Nonterminal(n) => {
                    out.extend(self.first[n.index()].iter().copied());
                    if !self.nullable[n.index()] {
                        return (out, false);
                    }
                }
            }
        }
        (out, true)
    }
}
