//! Positioned errors and warnings collected by every compilation stage.
//!
//! Stages push into a [`Diagnostics`] through [`Diagnostics::report`]; the
//! CLI and the attribute macro render them against the grammar source.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use std::fmt;

use rowan::TextRange;

pub use message::{DiagnosticKind, Severity};
pub use printer::DiagnosticsPrinter;

use message::{Diagnostic, Related};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

/// A diagnostic under construction. Nothing is recorded until [`emit`](Self::emit).
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut Vec<Diagnostic>,
    diagnostic: Diagnostic,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: &mut self.items,
            diagnostic: Diagnostic {
                kind,
                range,
                message: kind.message(None),
                related: Vec::new(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn count(&self, severity: Severity) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity() == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.count(Severity::Warning) > 0
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Kinds in report order.
    pub fn kinds(&self) -> impl Iterator<Item = DiagnosticKind> + '_ {
        self.items.iter().map(|d| d.kind)
    }

    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.kinds().any(|k| k == kind)
    }

    pub fn printer<'a>(&'a self, source: &'a str) -> DiagnosticsPrinter<'a> {
        DiagnosticsPrinter::new(&self.items, source)
    }

    pub fn render(&self, source: &str) -> String {
        self.printer(source).render()
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.printer(source).colored(colored).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }
}

impl DiagnosticBuilder<'_> {
    /// Replace the kind's summary with its detailed form.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        self.diagnostic.message = self.diagnostic.kind.message(Some(&detail.into()));
        self
    }

    pub fn related_to(mut self, label: impl Into<String>, range: TextRange) -> Self {
        self.diagnostic.related.push(Related {
            range,
            label: label.into(),
        });
        self
    }

    pub fn emit(self) {
        self.sink.push(self.diagnostic);
    }
}

/// One line per diagnostic, no source snippets.
impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for diagnostic in &self.items {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}
