//! LALR(1) parse table.
//!
//! Dense action and goto matrices indexed by state, plus the reduction rules
//! `Reduce` actions refer to. Cells not set are [`Action::Error`] and
//! missing gotos.

use std::fmt::{self, Write};

use snout_core::TerminalId;

use crate::grammar::NonterminalId;

pub type StateId = u32;
pub type RuleId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    #[default]
    Error,
    Shift(StateId),
    Reduce(RuleId),
    Accept,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReductionRule {
    pub produces: NonterminalId,
    /// Right-hand side length.
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    terminals: Vec<String>,
    nonterminals: Vec<String>,
    state_count: usize,
    actions: Vec<Action>,
    gotos: Vec<Option<StateId>>,
    rules: Vec<ReductionRule>,
}

impl ParseTable {
    pub fn new(terminals: Vec<String>, nonterminals: Vec<String>, state_count: usize) -> Self {
        Self {
            actions: vec![Action::Error; state_count * terminals.len()],
            gotos: vec![None; state_count * nonterminals.len()],
            terminals,
            nonterminals,
            state_count,
            rules: Vec::new(),
        }
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    pub fn nonterminal_count(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn terminal_name(&self, terminal: TerminalId) -> &str {
        &self.terminals[terminal.index()]
    }

    pub fn nonterminal_name(&self, nonterminal: NonterminalId) -> &str {
        &self.nonterminals[nonterminal.index()]
    }

    pub fn set_action(&mut self, state: StateId, terminal: TerminalId, action: Action) {
        let index = self.action_index(state, terminal.index());
        self.actions[index] = action;
    }

    /// `Error` for cells outside the table.
    pub fn action(&self, state: StateId, terminal: TerminalId) -> Action {
        if state as usize >= self.state_count || terminal.index() >= self.terminals.len() {
            return Action::Error;
        }
        self.actions[self.action_index(state, terminal.index())]
    }

    pub fn set_goto(&mut self, state: StateId, nonterminal: NonterminalId, target: StateId) {
        let index = self.goto_index(state, nonterminal.index());
        self.gotos[index] = Some(target);
    }

    pub fn goto(&self, state: StateId, nonterminal: NonterminalId) -> Option<StateId> {
        if state as usize >= self.state_count || nonterminal.index() >= self.nonterminals.len() {
            return None;
        }
        self.gotos[self.goto_index(state, nonterminal.index())]
    }

    pub fn push_rule(&mut self, rule: ReductionRule) -> RuleId {
        self.rules.push(rule);
        (self.rules.len() - 1) as RuleId
    }

    pub fn rule(&self, id: RuleId) -> Option<&ReductionRule> {
        self.rules.get(id as usize)
    }

    pub fn rules(&self) -> &[ReductionRule] {
        &self.rules
    }

    fn action_index(&self, state: StateId, terminal: usize) -> usize {
        state as usize * self.terminals.len() + terminal
    }

    fn goto_index(&self, state: StateId, nonterminal: usize) -> usize {
        state as usize * self.nonterminals.len() + nonterminal
    }

    /// Rules, then one line per state listing its non-error cells.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut impl Write) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            writeln!(w, "r{}: {} ({})", i, self.nonterminal_name(rule.produces), rule.len)?;
        }

        for state in 0..self.state_count as StateId {
            let mut cells = Vec::new();
            for t in 0..self.terminals.len() as u32 {
                let terminal = TerminalId::new(t);
                let name = self.terminal_name(terminal);
                match self.action(state, terminal) {
                    Action::Error => {}
                    Action::Shift(target) => cells.push(format!("{name} → shift S{target}")),
                    Action::Reduce(rule) => cells.push(format!("{name} → reduce r{rule}")),
                    Action::Accept => cells.push(format!("{name} → accept")),
                }
            }
            for n in 0..self.nonterminals.len() as u32 {
                let nonterminal = NonterminalId::new(n);
                if let Some(target) = self.goto(state, nonterminal) {
                    cells.push(format!("{} ⇒ S{}", self.nonterminal_name(nonterminal), target));
                }
            }

            if cells.is_empty() {
                writeln!(w, "S{state}:")?;
            } else {
                writeln!(w, "S{}: {}", state, cells.join(", "))?;
            }
        }
        Ok(())
    }
}
