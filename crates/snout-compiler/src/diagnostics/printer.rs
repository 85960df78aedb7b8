//! Snippet rendering through `annotate-snippets`.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use rowan::TextRange;

use super::message::{Diagnostic, Severity};

pub struct DiagnosticsPrinter<'a> {
    items: &'a [Diagnostic],
    source: &'a str,
    path: Option<&'a str>,
    colored: bool,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub(super) fn new(items: &'a [Diagnostic], source: &'a str) -> Self {
        Self {
            items,
            source,
            path: None,
            colored: false,
        }
    }

    /// File name shown in the `-->` line.
    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// One report per diagnostic, each on its own lines.
    pub fn render(&self) -> String {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let mut reports = Vec::with_capacity(self.items.len());
        for diagnostic in self.items {
            let mut snippet = Snippet::source(self.source).line_start(1).annotation(
                AnnotationKind::Primary
                    .span(self.visible(diagnostic.range))
                    .label(&diagnostic.message),
            );
            if let Some(path) = self.path {
                snippet = snippet.path(path);
            }
            for related in &diagnostic.related {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(self.visible(related.range))
                        .label(&related.label),
                );
            }

            let report = vec![
                level(diagnostic.severity())
                    .primary_title(&diagnostic.message)
                    .element(snippet),
            ];
            reports.push(renderer.render(&report).to_string());
        }
        reports.join("\n")
    }

    /// Empty ranges get one character of width so the caret shows.
    fn visible(&self, range: TextRange) -> Range<usize> {
        let start = usize::from(range.start());
        let end = usize::from(range.end());
        if start == end {
            start..(start + 1).min(self.source.len())
        } else {
            start..end
        }
    }
}

fn level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}
