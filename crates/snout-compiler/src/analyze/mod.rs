//! Name resolution: CST → EBNF rules over catalog terminals.
//!
//! Identifiers naming a rule are nonterminals, otherwise catalog ids are
//! terminals, otherwise they are undefined. Rules win over actions of the
//! same name (with a warning).


use indexmap::IndexMap;
use rowan::TextRange;
use snout_core::{ActionCatalog, TerminalId};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::{Alt, AstNode, Atom, Branch, Repetition, Root};
use crate::{Error, PassResult};

/// Name of the rule wrapping a grammar written as one bare expression.
pub const IMPLICIT_RULE: &str = "syntax";

pub type RuleId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Empty,
    Terminal(TerminalId),
    Rule(RuleId),
    Seq(Vec<Expr>),
    Alt(Vec<Expr>),
    Repeat(Box<Expr>, Repetition),
}

impl Expr {
    pub fn repeat(inner: Expr, repetition: Repetition) -> Self {
        Self::Repeat(Box::new(inner), repetition)
    }

    /// Top-level alternatives; a non-alternation is its own single branch.
    pub fn branches(&self) -> &[Expr] {
        match self {
            Self::Alt(branches) => branches,
            other => std::slice::from_ref(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub name: String,
    pub span: TextRange,
    pub body: Expr,
}

/// Resolved grammar. Rule 0 is the start rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ebnf {
    pub rules: Vec<RuleDef>,
}

impl Ebnf {
    pub const START: RuleId = 0;

    pub fn rule(&self, id: RuleId) -> &RuleDef {
        &self.rules[id]
    }
}

pub fn analyze(root: &Root, catalog: &ActionCatalog) -> PassResult<Ebnf> {
    let mut diagnostics = Diagnostics::new();
    let mut symbols: IndexMap<String, RuleId> = IndexMap::new();
    let mut decls: Vec<(String, TextRange, Option<Alt>)> = Vec::new();

    if let Some(expr) = root.expr() {
        decls.push((IMPLICIT_RULE.to_string(), expr.range(), Some(expr)));
    }

    for rule in root.rules() {
        let Some(name_token) = rule.name() else {
            continue;
        };
        let name = name_token.text().to_string();
        let span = name_token.text_range();

        if let Some(&previous) = symbols.get(&name) {
            diagnostics
                .report(DiagnosticKind::DuplicateRule, span)
                .message(&name)
                .related_to("first defined here", decls[previous].1)
                .emit();
            continue;
        }
        if catalog.lookup(&name).is_some() {
            diagnostics
                .report(DiagnosticKind::ShadowedAction, span)
                .message(&name)
                .emit();
        }

        symbols.insert(name.clone(), decls.len());
        decls.push((name, span, rule.body()));
    }

    if decls.is_empty() {
        diagnostics
            .report(DiagnosticKind::EmptyGrammar, TextRange::empty(0.into()))
            .emit();
        return Err(Error::InvalidGrammar(diagnostics));
    }

    let mut resolver = Resolver {
        catalog,
        symbols: &symbols,
        diagnostics: &mut diagnostics,
        undefined: Vec::new(),
    };
    let rules: Vec<RuleDef> = decls
        .into_iter()
        .map(|(name, span, body)| RuleDef {
            name,
            span,
            body: body.map_or(Expr::Empty, |alt| resolver.alt(&alt)),
        })
        .collect();
    let undefined = resolver.undefined;

    let ebnf = Ebnf { rules };
    report_unused(&ebnf, &mut diagnostics);

    if let Some(name) = undefined.into_iter().next() {
        return Err(Error::UndefinedSymbol { name, diagnostics });
    }
    if diagnostics.has_errors() {
        return Err(Error::InvalidGrammar(diagnostics));
    }

    tracing::debug!(rules = ebnf.rules.len(), "resolved grammar symbols");
    Ok((ebnf, diagnostics))
}

struct Resolver<'a> {
    catalog: &'a ActionCatalog,
    symbols: &'a IndexMap<String, RuleId>,
    diagnostics: &'a mut Diagnostics,
    undefined: Vec<String>,
}

impl Resolver<'_> {
    fn alt(&mut self, alt: &Alt) -> Expr {
        let mut branches: Vec<Expr> = alt.branches().map(|b| self.branch(&b)).collect();
        if branches.len() == 1 {
            return branches.pop().unwrap_or(Expr::Empty);
        }
        Expr::Alt(branches)
    }

    fn branch(&mut self, branch: &Branch) -> Expr {
        let mut items: Vec<Expr> = branch.atoms().map(|a| self.atom(&a)).collect();
        match items.len() {
            0 => Expr::Empty,
            1 => items.pop().unwrap_or(Expr::Empty),
            _ => Expr::Seq(items),
        }
    }

    fn atom(&mut self, atom: &Atom) -> Expr {
        match atom {
            Atom::Ref(r) => {
                let Some(token) = r.name() else {
                    return Expr::Empty;
                };
                self.reference(token.text(), token.text_range())
            }
            Atom::Group(g) => g.body().map_or(Expr::Empty, |alt| self.alt(&alt)),
            Atom::Quantifier(q) => {
                let inner = q.inner().map_or(Expr::Empty, |a| self.atom(&a));
                match q.repetition() {
                    Some(repetition) => Expr::repeat(inner, repetition),
                    None => inner,
                }
            }
        }
    }

    fn reference(&mut self, name: &str, span: TextRange) -> Expr {
        if let Some(&rule) = self.symbols.get(name) {
            return Expr::Rule(rule);
        }
        if let Some(terminal) = self.catalog.lookup(name) {
            return Expr::Terminal(terminal);
        }
        self.diagnostics
            .report(DiagnosticKind::UndefinedSymbol, span)
            .message(name)
            .emit();
        self.undefined.push(name.to_string());
        Expr::Empty
    }
}

fn report_unused(ebnf: &Ebnf, diagnostics: &mut Diagnostics) {
    let mut used = vec![false; ebnf.rules.len()];
    let mut queue = vec![Ebnf::START];
    while let Some(id) = queue.pop() {
        if std::mem::replace(&mut used[id], true) {
            continue;
        }
        collect_rule_refs(&ebnf.rules[id].body, &mut queue);
    }

    for (rule, used) in ebnf.rules.iter().zip(used) {
        if !used {
            diagnostics
                .report(DiagnosticKind::UnusedRule, rule.span)
                .message(&rule.name)
                .emit();
        }
    }
}

pub(crate) fn collect_rule_refs(expr: &Expr, out: &mut Vec<RuleId>) {
    match expr {
        Expr::Empty | Expr::Terminal(_) => {}
        Expr::Rule(id) => out.push(*id),
        Expr::Seq(items) | Expr::Alt(items) => {
            for item in items {
                collect_rule_refs(item, out);
            }
        }
        Expr::Repeat(inner, _) => collect_rule_refs(inner, out),
    }
}
