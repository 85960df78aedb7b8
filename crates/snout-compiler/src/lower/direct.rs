//! One nonterminal per rule, helpers for nested groups and quantifiers.

use snout_core::ActionCatalog;

use crate::analyze::{Ebnf, Expr, RuleId};
use crate::grammar::{Grammar, NonterminalId, Symbol};
use crate::parser::Repetition;

pub(super) fn lower(ebnf: &Ebnf, catalog: &ActionCatalog) -> Grammar {
    let mut grammar = Grammar::new(catalog);
    let rules: Vec<NonterminalId> = ebnf
        .rules
        .iter()
        .map(|rule| grammar.add_nonterminal(rule.name.clone(), rule.span))
        .collect();

    let mut direct = Direct {
        ebnf,
        grammar,
        rules,
        counters: vec![0; ebnf.rules.len()],
    };
    for (id, rule) in ebnf.rules.iter().enumerate() {
        let lhs = direct.rules[id];
        for branch in rule.body.branches() {
            let rhs = direct.sequence(branch, id);
            direct.produce(lhs, rhs, id);
        }
    }

    direct.grammar.set_start(direct.rules[Ebnf::START]);
    direct.grammar
}

struct Direct<'a> {
    ebnf: &'a Ebnf,
    grammar: Grammar,
    rules: Vec<NonterminalId>,
    counters: Vec<u32>,
}

impl Direct<'_> {
    fn sequence(&mut self, expr: &Expr, owner: RuleId) -> Vec<Symbol> {
        match expr {
            Expr::Empty => Vec::new(),
            Expr::Terminal(t) => vec![Symbol::Terminal(*t)],
            Expr::Rule(r) => vec![Symbol::Nonterminal(self.rules[*r])],
            Expr::Seq(items) => items
                .iter()
                .flat_map(|item| self.sequence(item, owner))
                .collect(),
            Expr::Alt(branches) => {
                let n = self.fresh(owner);
                for branch in branches {
                    let rhs = self.sequence(branch, owner);
                    self.produce(n, rhs, owner);
                }
                vec![Symbol::Nonterminal(n)]
            }
            Expr::Repeat(inner, repetition) => {
                let n = self.fresh(owner);
                let body = self.sequence(inner, owner);
                let mut looped = body.clone();
                looped.push(Symbol::Nonterminal(n));
                match repetition {
                    Repetition::ZeroOrMore => {
                        self.produce(n, looped, owner);
                        self.produce(n, Vec::new(), owner);
                    }
                    Repetition::OneOrMore => {
                        self.produce(n, looped, owner);
                        self.produce(n, body, owner);
                    }
                    Repetition::Optional => {
                        self.produce(n, body, owner);
                        self.produce(n, Vec::new(), owner);
                    }
                }
                vec![Symbol::Nonterminal(n)]
            }
        }
    }

    fn fresh(&mut self, owner: RuleId) -> NonterminalId {
        self.counters[owner] += 1;
        let rule = self.ebnf.rule(owner);
        let name = format!("{}.{}", rule.name, self.counters[owner]);
        self.grammar.add_nonterminal(name, rule.span)
    }

    fn produce(&mut self, lhs: NonterminalId, rhs: Vec<Symbol>, owner: RuleId) {
        let span = self.ebnf.rule(owner).span;
        self.grammar.add_production(lhs, rhs, span);
    }
}
