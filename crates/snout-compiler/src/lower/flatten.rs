//! Right-linear expansion by continuation passing.
//!
//! `expr(e, k)` returns a nonterminal deriving `e` followed by whatever `k`
//! derives. Terminals become `N → t k`, so every production has at most one
//! terminal followed by one nonterminal, and the only ε-production is the
//! final continuation.
//!
//! Rules are expanded once per distinct continuation. A reference to a rule
//! already being expanded with the same continuation is a tail call and
//! reuses the nonterminal; with a different continuation the language is
//! not regular.

use std::collections::HashMap;

use snout_core::ActionCatalog;

use crate::analyze::{Ebnf, Expr, RuleId};
use crate::grammar::{Grammar, NonterminalId, Symbol};
use crate::parser::Repetition;

pub(super) struct NotRegular {
    pub rule: RuleId,
}

const FINISH: &str = "$finish";

pub(super) fn lower(ebnf: &Ebnf, catalog: &ActionCatalog) -> Result<Grammar, NotRegular> {
    let start_span = ebnf.rule(Ebnf::START).span;
    let mut flatten = Flatten {
        ebnf,
        grammar: Grammar::new(catalog),
        expansions: HashMap::new(),
        active: Vec::new(),
        named: vec![false; ebnf.rules.len()],
        counters: vec![0; ebnf.rules.len()],
    };

    let finish = flatten.grammar.add_nonterminal(FINISH, start_span);
    flatten.grammar.add_production(finish, Vec::new(), start_span);

    let start = flatten.rule(Ebnf::START, finish)?;
    flatten.grammar.set_start(start);
    Ok(flatten.grammar)
}

struct Flatten<'a> {
    ebnf: &'a Ebnf,
    grammar: Grammar,
    /// `(rule, continuation)` → expansion.
    expansions: HashMap<(RuleId, NonterminalId), NonterminalId>,
    /// Rules whose bodies are being expanded.
    active: Vec<RuleId>,
    named: Vec<bool>,
    counters: Vec<u32>,
}

impl Flatten<'_> {
    fn expr(
        &mut self,
        expr: &Expr,
        cont: NonterminalId,
        owner: RuleId,
    ) -> Result<NonterminalId, NotRegular> {
        match expr {
            Expr::Empty => Ok(cont),
            Expr::Terminal(t) => {
                let n = self.fresh(owner);
                self.produce(
                    n,
                    vec![Symbol::Terminal(*t), Symbol::Nonterminal(cont)],
                    owner,
                );
                Ok(n)
            }
            Expr::Rule(r) => self.rule(*r, cont),
            Expr::Seq(items) => {
                let mut next = cont;
                for item in items.iter().rev() {
                    next = self.expr(item, next, owner)?;
                }
                Ok(next)
            }
            Expr::Alt(branches) => {
                let n = self.fresh(owner);
                for branch in branches {
                    let target = self.expr(branch, cont, owner)?;
                    self.produce(n, vec![Symbol::Nonterminal(target)], owner);
                }
                Ok(n)
            }
            Expr::Repeat(inner, Repetition::ZeroOrMore) => {
                let n = self.fresh(owner);
                let body = self.expr(inner, n, owner)?;
                self.produce(n, vec![Symbol::Nonterminal(body)], owner);
                self.produce(n, vec![Symbol::Nonterminal(cont)], owner);
                Ok(n)
            }
            Expr::Repeat(inner, Repetition::OneOrMore) => {
                // P: one iteration, then Q: again or done.
                let p = self.fresh(owner);
                let q = self.fresh(owner);
                let body = self.expr(inner, q, owner)?;
                self.produce(p, vec![Symbol::Nonterminal(body)], owner);
                self.produce(q, vec![Symbol::Nonterminal(p)], owner);
                self.produce(q, vec![Symbol::Nonterminal(cont)], owner);
                Ok(p)
            }
            Expr::Repeat(inner, Repetition::Optional) => {
                let n = self.fresh(owner);
                let body = self.expr(inner, cont, owner)?;
                self.produce(n, vec![Symbol::Nonterminal(body)], owner);
                self.produce(n, vec![Symbol::Nonterminal(cont)], owner);
                Ok(n)
            }
        }
    }

    fn rule(&mut self, rule: RuleId, cont: NonterminalId) -> Result<NonterminalId, NotRegular> {
        if let Some(&n) = self.expansions.get(&(rule, cont)) {
            return Ok(n);
        }
        if self.active.contains(&rule) {
            return Err(NotRegular { rule });
        }

        let n = if std::mem::replace(&mut self.named[rule], true) {
            self.fresh(rule)
        } else {
            let def = self.ebnf.rule(rule);
            self.grammar.add_nonterminal(def.name.clone(), def.span)
        };
        self.expansions.insert((rule, cont), n);

        let ebnf = self.ebnf;
        self.active.push(rule);
        let body = self.expr(&ebnf.rule(rule).body, cont, rule)?;
        self.active.pop();

        self.produce(n, vec![Symbol::Nonterminal(body)], rule);
        Ok(n)
    }

    fn fresh(&mut self, owner: RuleId) -> NonterminalId {
        self.counters[owner] += 1;
        let def = self.ebnf.rule(owner);
        let name = format!("{}.{}", def.name, self.counters[owner]);
        self.grammar.add_nonterminal(name, def.span)
    }

    fn produce(&mut self, lhs: NonterminalId, rhs: Vec<Symbol>, owner: RuleId) {
        let span = self.ebnf.rule(owner).span;
        self.grammar.add_production(lhs, rhs, span);
    }
}
