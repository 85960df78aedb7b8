//! Lossless parser for the grammar language.
//!
//! Tokens come from `logos` and are assembled into a `rowan` green tree.
//! Whitespace and comments survive as trivia, attached before the next
//! node. A quantifier wraps the atom before it through a checkpoint.
//!
//! Malformed input never aborts the parse: the tree gets `Error` nodes and
//! the diagnostics say what went wrong. Only nesting past the recursion
//! limit is fatal.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;


use std::fmt::Write;

use rowan::NodeOrToken;

pub use ast::{Alt, AstNode, Atom, Branch, Group, Quantifier, Ref, Repetition, Root, Rule};
pub use self::core::{DEFAULT_RECURSION_LIMIT, Parser};
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

use crate::PassResult;
use lexer::lex;

/// A finished tree. Cheap to clone; nodes are rebuilt on demand.
#[derive(Debug, Clone)]
pub struct Parse {
    green: rowan::GreenNode,
}

impl Parse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn root(&self) -> Root {
        Root::cast(self.syntax()).expect("parser always produces Root")
    }

    /// Tree outline, one node or token per line, trivia skipped.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        write_tree(&mut out, &self.syntax(), 0).expect("String write never fails");
        out
    }
}

pub fn parse(source: &str) -> PassResult<Parse> {
    parse_with_limit(source, DEFAULT_RECURSION_LIMIT)
}

/// Like [`parse`], failing once groups nest deeper than `recursion_limit`.
pub fn parse_with_limit(source: &str, recursion_limit: u32) -> PassResult<Parse> {
    let mut parser = Parser::new(source, lex(source)).with_recursion_limit(recursion_limit);
    parser.parse_root();
    let (green, diagnostics) = parser.finish()?;
    Ok((Parse { green }, diagnostics))
}

fn write_tree(out: &mut impl Write, node: &SyntaxNode, depth: usize) -> std::fmt::Result {
    let indent = depth * 2;
    writeln!(out, "{:indent$}{:?}", "", node.kind())?;
    for element in node.children_with_tokens() {
        match element {
            NodeOrToken::Node(child) => write_tree(out, &child, depth + 1)?,
            NodeOrToken::Token(token) if token.kind().is_trivia() => {}
            NodeOrToken::Token(token) => {
                let width = indent + 2;
                writeln!(out, "{:width$}{:?} {:?}", "", token.kind(), token.text())?;
            }
        }
    }
    Ok(())
}
