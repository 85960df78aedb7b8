//! Token cursor and tree-building primitives used by the productions in `grammar.rs`.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::SyntaxKind;
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Nesting depth of parenthesized groups accepted before giving up.
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    cursor: usize,
    /// Trivia passed over but not yet attached; it leads the next node or token.
    pending: Vec<Token>,
    tree: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    depth: u32,
    limit: u32,
    last_error_at: Option<TextSize>,
    fatal: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            cursor: 0,
            pending: Vec::new(),
            tree: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            limit: DEFAULT_RECURSION_LIMIT,
            last_error_at: None,
            fatal: None,
        }
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub(super) fn finish(mut self) -> Result<(GreenNode, Diagnostics), Error> {
        self.attach_trailing_trivia();
        match self.fatal {
            Some(err) => Err(err),
            None => Ok((self.tree.finish(), self.diagnostics)),
        }
    }

    // Cursor

    fn skip_trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.cursor) {
            if !token.kind.is_trivia() {
                break;
            }
            self.pending.push(token);
            self.cursor += 1;
        }
    }

    fn flush_trivia(&mut self) {
        for token in std::mem::take(&mut self.pending) {
            self.tree
                .token(token.kind.into(), token_text(self.source, &token));
        }
    }

    pub(super) fn attach_trailing_trivia(&mut self) {
        self.skip_trivia();
        self.flush_trivia();
    }

    /// Kind of the next significant token, `Error` past the end.
    pub(super) fn kind(&mut self) -> SyntaxKind {
        self.skip_trivia();
        self.tokens
            .get(self.cursor)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    pub(super) fn at_any(&mut self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.kind())
    }

    /// Span of the next significant token, empty at the end of input.
    pub(super) fn span(&mut self) -> TextRange {
        self.skip_trivia();
        match self.tokens.get(self.cursor) {
            Some(token) => token.span,
            None => TextRange::empty(TextSize::of(self.source)),
        }
    }

    pub(super) fn at_eof(&mut self) -> bool {
        self.skip_trivia();
        self.cursor >= self.tokens.len()
    }

    /// Nothing left to parse, or parsing was abandoned.
    pub(super) fn done(&mut self) -> bool {
        self.at_eof() || self.fatal.is_some()
    }

    /// `Id ':'`, looking past trivia.
    pub(super) fn at_rule_start(&mut self) -> bool {
        if !self.at(SyntaxKind::Id) {
            return false;
        }
        let after = self.tokens[self.cursor + 1..]
            .iter()
            .find(|t| !t.kind.is_trivia());
        matches!(after, Some(t) if t.kind == SyntaxKind::Colon)
    }

    fn previous_end(&self) -> Option<TextSize> {
        self.tokens[..self.cursor]
            .iter()
            .rfind(|t| !t.kind.is_trivia())
            .map(|t| t.span.end())
    }

    // Tree

    pub(super) fn start(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.tree.start_node(kind.into());
    }

    pub(super) fn start_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.tree.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.tree.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.tree.checkpoint()
    }

    pub(super) fn bump(&mut self) {
        self.flush_trivia();
        let token = self.tokens[self.cursor];
        self.tree
            .token(token.kind.into(), token_text(self.source, &token));
        self.cursor += 1;
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        let found = self.at(kind);
        if found {
            self.bump();
        }
        found
    }

    /// Wrap the next token in an `Error` node.
    pub(super) fn bump_error(&mut self) {
        if self.at_eof() {
            return;
        }
        self.start(SyntaxKind::Error);
        self.bump();
        self.finish_node();
    }

    // Diagnostics. At most one per source offset.

    fn first_at(&mut self, offset: TextSize) -> bool {
        let first = self.last_error_at != Some(offset);
        self.last_error_at = Some(offset);
        first
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind, message: Option<&str>) {
        let range = self.span();
        if !self.first_at(range.start()) {
            return;
        }
        let report = self.diagnostics.report(kind, range);
        match message {
            Some(message) => report.message(message).emit(),
            None => report.emit(),
        }
    }

    /// Report a missing token right after the previous one.
    pub(super) fn missing(&mut self, kind: DiagnosticKind, started: TextRange) {
        let at = match self.previous_end() {
            Some(end) => end,
            None => self.span().start(),
        };
        if !self.first_at(at) {
            return;
        }
        self.diagnostics
            .report(kind, TextRange::empty(at))
            .related_to("started here", started)
            .emit();
    }

    /// Report a delimiter opened at `open` and never closed.
    pub(super) fn unclosed(&mut self, kind: DiagnosticKind, open: TextRange) {
        let here = self.span();
        if !self.first_at(here.start()) {
            return;
        }
        self.diagnostics
            .report(kind, open.cover(here))
            .related_to("opened here", open)
            .emit();
    }

    pub(super) fn enter_group(&mut self) -> bool {
        if self.depth >= self.limit {
            self.fatal = Some(Error::RecursionLimitExceeded);
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn leave_group(&mut self) {
        self.depth -= 1;
    }
}
