//! Context-free grammar in plain BNF, the input of the table builder.
//!
//! Terminals are the catalog's actions in catalog order followed by the
//! end-of-input marker. Nonterminals are rules plus whatever lowering
//! synthesized for groups and quantifiers.

use std::fmt::{self, Write};

use rowan::TextRange;
use snout_core::{ActionCatalog, TerminalId};

pub const END_MARKER: &str = "$end";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonterminalId(u32);

impl NonterminalId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Terminals order before nonterminals, which keeps transition order stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(TerminalId),
    Nonterminal(NonterminalId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonterminal {
    pub name: String,
    /// Rule the nonterminal was derived from.
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: NonterminalId,
    pub rhs: Vec<Symbol>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    terminals: Vec<String>,
    nonterminals: Vec<Nonterminal>,
    productions: Vec<Production>,
    start: NonterminalId,
}

impl Grammar {
    /// Empty grammar over the catalog's vocabulary. `start` must be set before use.
    pub fn new(catalog: &ActionCatalog) -> Self {
        let mut terminals: Vec<String> = catalog.iter().map(|(_, a)| a.id.clone()).collect();
        terminals.push(END_MARKER.to_string());
        Self {
            terminals,
            nonterminals: Vec::new(),
            productions: Vec::new(),
            start: NonterminalId::new(0),
        }
    }

    pub fn add_nonterminal(&mut self, name: impl Into<String>, span: TextRange) -> NonterminalId {
        let id = NonterminalId::new(self.nonterminals.len() as u32);
        self.nonterminals.push(Nonterminal {
            name: name.into(),
            span,
        });
        id
    }

    pub fn add_production(&mut self, lhs: NonterminalId, rhs: Vec<Symbol>, span: TextRange) {
        self.productions.push(Production { lhs, rhs, span });
    }

    pub fn set_start(&mut self, start: NonterminalId) {
        self.start = start;
    }

    pub fn start(&self) -> NonterminalId {
        self.start
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    pub fn nonterminal_count(&self) -> usize {
        self.nonterminals.len()
    }

    /// The end-of-input marker, always the last terminal.
    pub fn end_terminal(&self) -> TerminalId {
        TerminalId::new(self.terminals.len() as u32 - 1)
    }

    pub fn terminal_name(&self, terminal: TerminalId) -> &str {
        &self.terminals[terminal.index()]
    }

    pub fn terminal_names(&self) -> &[String] {
        &self.terminals
    }

    pub fn nonterminal(&self, id: NonterminalId) -> &Nonterminal {
        &self.nonterminals[id.index()]
    }

    pub fn nonterminals(&self) -> &[Nonterminal] {
        &self.nonterminals
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, index: usize) -> &Production {
        &self.productions[index]
    }

    /// Production indexes grouped by left-hand side.
    pub fn productions_by_lhs(&self) -> Vec<Vec<usize>> {
        let mut by_lhs = vec![Vec::new(); self.nonterminals.len()];
        for (i, p) in self.productions.iter().enumerate() {
            by_lhs[p.lhs.index()].push(i);
        }
        by_lhs
    }

    /// Copy with `$accept → start` appended as the last nonterminal and production.
    pub fn augmented(&self) -> Self {
        let mut grammar = self.clone();
        let span = self.nonterminal(self.start).span;
        let accept = grammar.add_nonterminal("$accept", span);
        grammar.add_production(accept, vec![Symbol::Nonterminal(self.start)], span);
        grammar.start = accept;
        grammar
    }

    pub fn symbol_name(&self, symbol: Symbol) -> &str {
        match symbol {
            Symbol::Terminal(t) => self.terminal_name(t),
            Symbol::Nonterminal(n) => &self.nonterminal(n).name,
        }
    }

    pub fn display_production(&self, index: usize) -> String {
        let p = &self.productions[index];
        let mut out = format!("{} →", self.nonterminal(p.lhs).name);
        if p.rhs.is_empty() {
            out.push_str(" ε");
        }
        for &symbol in &p.rhs {
            out.push(' ');
            out.push_str(self.symbol_name(symbol));
        }
        out
    }

    /// One production per line, numbered.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut impl Write) -> fmt::Result {
        writeln!(w, "start: {}", self.nonterminal(self.start).name)?;
        for i in 0..self.productions.len() {
            writeln!(w, "r{}: {}", i, self.display_production(i))?;
        }
        Ok(())
    }
}
