//! LALR(1) table construction.
//!
//! Builds the LR(0) item automaton with kernels as state identity and
//! propagates LR(1) lookaheads into merged kernels until nothing grows.
//! States are numbered in discovery order and transitions are explored in
//! symbol order, so numbering is deterministic for a given grammar.
//!
//! Conflicts on user terminals are errors. Conflicts on end-of-input only
//! decide which completion wins: accept first, then the lowest production.
//! They do not affect which actions can follow which.

mod first;


use std::collections::{BTreeMap, BTreeSet, VecDeque};

use indexmap::IndexMap;
use snout_core::TerminalId;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grammar::{Grammar, Symbol};
use crate::table::{Action, ParseTable, ReductionRule, StateId};
use crate::{Error, PassResult};
use first::FirstSets;

/// Production with a position marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Item {
    production: usize,
    dot: usize,
}

impl Item {
    fn advance(self) -> Self {
        Self {
            production: self.production,
            dot: self.dot + 1,
        }
    }
}

type Lookaheads = BTreeMap<Item, BTreeSet<TerminalId>>;

pub fn build(grammar: &Grammar) -> PassResult<ParseTable> {
    let builder = Builder::new(grammar);
    let states = builder.states();
    builder.table(&states)
}

struct Builder {
    augmented: Grammar,
    by_lhs: Vec<Vec<usize>>,
    first: FirstSets,
    accept: usize,
}

/// Kernel lookaheads and outgoing transitions of each state.
struct States {
    kernels: IndexMap<Vec<Item>, Lookaheads>,
    transitions: Vec<BTreeMap<Symbol, usize>>,
}

impl Builder {
    fn new(grammar: &Grammar) -> Self {
        let augmented = grammar.augmented();
        Self {
            by_lhs: augmented.productions_by_lhs(),
            first: FirstSets::compute(&augmented),
            accept: augmented.productions().len() - 1,
            augmented,
        }
    }

    fn states(&self) -> States {
        let start = Item {
            production: self.accept,
            dot: 0,
        };
        let mut kernels: IndexMap<Vec<Item>, Lookaheads> = IndexMap::new();
        kernels.insert(
            vec![start],
            BTreeMap::from([(start, BTreeSet::from([self.augmented.end_terminal()]))]),
        );
        let mut transitions = vec![BTreeMap::new()];
        let mut queue = VecDeque::from([0]);
        let mut queued = vec![true];

        while let Some(state) = queue.pop_front() {
            queued[state] = false;
            let closure = self.closure(&kernels[state]);

            let mut moves: BTreeMap<Symbol, Lookaheads> = BTreeMap::new();
            for (item, lookaheads) in &closure {
                if let Some(&symbol) = self.next_symbol(*item) {
                    moves
                        .entry(symbol)
                        .or_default()
                        .entry(item.advance())
                        .or_default()
                        .extend(lookaheads.iter().copied());
                }
            }

            for (symbol, kernel) in moves {
                let key: Vec<Item> = kernel.keys().copied().collect();
                let target = match kernels.get_index_of(&key) {
                    Some(target) => {
                        let existing = &mut kernels[target];
                        let mut grew = false;
                        for (item, lookaheads) in kernel {
                            let set = existing.entry(item).or_default();
                            let before = set.len();
                            set.extend(lookaheads);
                            grew |= set.len() != before;
                        }
                        if grew && !queued[target] {
                            queued[target] = true;
                            queue.push_back(target);
                        }
                        target
                    }
                    None => {
                        let target = kernels.len();
                        kernels.insert(key, kernel);
                        transitions.push(BTreeMap::new());
                        queued.push(true);
                        queue.push_back(target);
                        target
                    }
                };
                transitions[state].insert(symbol, target);
            }
        }

        tracing::trace!(states = kernels.len(), "built item automaton");
        States {
            kernels,
            transitions,
        }
    }

    fn next_symbol(&self, item: Item) -> Option<&Symbol> {
        self.augmented.production(item.production).rhs.get(item.dot)
    }

    fn closure(&self, kernel: &Lookaheads) -> Lookaheads {
        let mut items = kernel.clone();
        let mut stack: Vec<Item> = kernel.keys().copied().collect();

        while let Some(item) = stack.pop() {
            let rhs = &self.augmented.production(item.production).rhs;
            let Some(Symbol::Nonterminal(next)) = rhs.get(item.dot) else {
                continue;
            };

            let (mut lookaheads, nullable) = self.first.of_sequence(&rhs[item.dot + 1..]);
            if nullable {
                lookaheads.extend(items[&item].iter().copied());
            }

            for &production in &self.by_lhs[next.index()] {
                let derived = Item { production, dot: 0 };
                let is_new = !items.contains_key(&derived);
                let set = items.entry(derived).or_default();
                let before = set.len();
                set.extend(lookaheads.iter().copied());
                if is_new || set.len() != before {
                    stack.push(derived);
                }
            }
        }
        items
    }

    fn table(&self, states: &States) -> PassResult<ParseTable> {
        let grammar = &self.augmented;
        let user_nonterminals = grammar.nonterminal_count() - 1;
        let nonterminal_names = grammar.nonterminals()[..user_nonterminals]
            .iter()
            .map(|n| n.name.clone())
            .collect();
        let mut table = ParseTable::new(
            grammar.terminal_names().to_vec(),
            nonterminal_names,
            states.kernels.len(),
        );
        for production in &grammar.productions()[..self.accept] {
            table.push_rule(ReductionRule {
                produces: production.lhs,
                len: production.rhs.len(),
            });
        }

        let mut diagnostics = Diagnostics::new();
        for (state, kernel) in states.kernels.values().enumerate() {
            let id = state as StateId;
            let mut cells: BTreeMap<TerminalId, Vec<Action>> = BTreeMap::new();

            for (&symbol, &target) in &states.transitions[state] {
                match symbol {
                    Symbol::Terminal(t) => {
                        cells
                            .entry(t)
                            .or_default()
                            .push(Action::Shift(target as StateId));
                    }
                    Symbol::Nonterminal(n) => table.set_goto(id, n, target as StateId),
                }
            }

            for (item, lookaheads) in self.closure(kernel) {
                if self.next_symbol(item).is_some() {
                    continue;
                }
                let action = if item.production == self.accept {
                    Action::Accept
                } else {
                    Action::Reduce(item.production as u32)
                };
                for terminal in lookaheads {
                    let cell = cells.entry(terminal).or_default();
                    if !cell.contains(&action) {
                        cell.push(action);
                    }
                }
            }

            for (terminal, candidates) in cells {
                let action = self.resolve(id, terminal, &candidates, &mut diagnostics);
                table.set_action(id, terminal, action);
            }
        }

        if diagnostics.has_errors() {
            return Err(Error::GrammarConflict(diagnostics));
        }

        tracing::debug!(
            states = table.state_count(),
            rules = table.rules().len(),
            "built parse table"
        );
        Ok((table, diagnostics))
    }

    /// Picks one action for a cell and reports when there was a choice.
    fn resolve(
        &self,
        state: StateId,
        terminal: TerminalId,
        candidates: &[Action],
        diagnostics: &mut Diagnostics,
    ) -> Action {
        let mut sorted = candidates.to_vec();
        sorted.sort_by_key(|action| match *action {
            Action::Accept => (0, 0),
            Action::Shift(s) => (1, s),
            Action::Reduce(r) => (2, r),
            Action::Error => (3, 0),
        });
        let chosen = sorted[0];
        if sorted.len() == 1 {
            return chosen;
        }

        let grammar = &self.augmented;
        let reductions: Vec<usize> = sorted
            .iter()
            .filter_map(|action| match *action {
                Action::Reduce(r) => Some(r as usize),
                Action::Accept => Some(self.accept),
                _ => None,
            })
            .collect();
        let shifts = sorted.iter().any(|a| matches!(a, Action::Shift(_)));
        let shape = if shifts { "shift/reduce" } else { "reduce/reduce" };

        let (kind, detail) = if terminal == grammar.end_terminal() {
            (
                DiagnosticKind::EndConflict,
                format!("{shape} conflict in state {state}"),
            )
        } else {
            (
                DiagnosticKind::GrammarConflict,
                format!(
                    "{shape} conflict on `{}` in state {state}",
                    grammar.terminal_name(terminal)
                ),
            )
        };

        let primary = grammar.production(reductions[0]).span;
        let mut report = diagnostics.report(kind, primary).message(detail);
        for &production in &reductions {
            report = report.related_to(
                format!("reduce by `{}`", grammar.display_production(production)),
                grammar.production(production).span,
            );
        }
        report.emit();

        chosen
    }
}
