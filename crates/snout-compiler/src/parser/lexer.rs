//! Lexer for the grammar language.
//!
//! Tokens are a kind plus a span into the source. Unrecognized characters
//! are merged into one `Garbage` token per run.

use std::ops::Range;

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

fn text_range(range: Range<usize>) -> TextRange {
    TextRange::new(
        TextSize::from(range.start as u32),
        TextSize::from(range.end as u32),
    )
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut garbage: Option<Range<usize>> = None;

    for (result, span) in SyntaxKind::lexer(source).spanned() {
        let Ok(kind) = result else {
            garbage = Some(match garbage {
                Some(run) => run.start..span.end,
                None => span,
            });
            continue;
        };
        if let Some(run) = garbage.take() {
            tokens.push(Token {
                kind: SyntaxKind::Garbage,
                span: text_range(run),
            });
        }
        tokens.push(Token {
            kind,
            span: text_range(span),
        });
    }

    if let Some(run) = garbage {
        tokens.push(Token {
            kind: SyntaxKind::Garbage,
            span: text_range(run),
        });
    }
    tokens
}

pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span]
}
