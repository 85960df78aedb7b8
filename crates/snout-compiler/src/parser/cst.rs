//! Token and node kinds of the grammar language.
//!
//! Token kinds carry their `logos` patterns; node kinds have none and only
//! appear in the tree the parser builds.

use logos::Logos;
use rowan::Language;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,
    #[token(")")]
    ParenClose,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("|")]
    Pipe,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,

    /// Rule name or action id; which one is decided during analysis.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    #[regex(r"[ \t]+")]
    Whitespace,
    #[token("\n")]
    #[token("\r\n")]
    Newline,
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,
    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// A run of characters no pattern matches.
    Garbage,
    Error,

    Root,
    Rule,
    Alt,
    Branch,
    Group,
    Quantifier,
    Ref,
}

use SyntaxKind::*;

impl SyntaxKind {
    const LAST: SyntaxKind = Ref;

    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnoutLang {}

impl Language for SnoutLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        assert!(raw.0 <= SyntaxKind::LAST as u16, "unknown syntax kind {}", raw.0);
        // SAFETY: `SyntaxKind` is `repr(u16)` with contiguous discriminants up to `LAST`.
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<SnoutLang>;
pub type SyntaxToken = rowan::SyntaxToken<SnoutLang>;

/// Kind groups the productions branch on.
pub mod token_sets {
    use super::SyntaxKind::{self, *};

    pub const ATOM_START: &[SyntaxKind] = &[Id, ParenOpen];

    pub const QUANTIFIERS: &[SyntaxKind] = &[Star, Plus, Question];

    /// Ends a branch without being part of it.
    pub const BRANCH_END: &[SyntaxKind] = &[Pipe, Semicolon, ParenClose];
}
