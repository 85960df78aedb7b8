//! Typed views over the CST.
//!
//! Views never fail on well-formed kinds; anything structurally missing
//! comes back as `None` and is dealt with in `analyze`.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

/// A CST node of one known kind.
pub trait AstNode: Sized {
    const KIND: SyntaxKind;

    fn from_node(node: SyntaxNode) -> Self;

    fn node(&self) -> &SyntaxNode;

    fn cast(node: SyntaxNode) -> Option<Self> {
        if node.kind() == Self::KIND {
            Some(Self::from_node(node))
        } else {
            None
        }
    }

    fn range(&self) -> TextRange {
        self.node().text_range()
    }
}

macro_rules! view {
    ($($name:ident),* $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            const KIND: SyntaxKind = SyntaxKind::$name;

            fn from_node(node: SyntaxNode) -> Self {
                Self(node)
            }

            fn node(&self) -> &SyntaxNode {
                &self.0
            }
        }
    )*};
}

view!(Root, Rule, Alt, Branch, Group, Quantifier, Ref);

fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(rowan::NodeOrToken::into_token)
        .find(|t| t.kind() == kind)
}

/// What a [`Quantifier`] does to its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repetition {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    Optional,
}

impl Repetition {
    fn from_kind(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::Star => Self::ZeroOrMore,
            SyntaxKind::Plus => Self::OneOrMore,
            SyntaxKind::Question => Self::Optional,
            _ => return None,
        })
    }
}

/// Element of a branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    Ref(Ref),
    Group(Group),
    Quantifier(Quantifier),
}

impl Atom {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        let atom = match node.kind() {
            SyntaxKind::Ref => Self::Ref(Ref(node)),
            SyntaxKind::Group => Self::Group(Group(node)),
            SyntaxKind::Quantifier => Self::Quantifier(Quantifier(node)),
            _ => return None,
        };
        Some(atom)
    }

    pub fn range(&self) -> TextRange {
        match self {
            Self::Ref(r) => r.range(),
            Self::Group(g) => g.range(),
            Self::Quantifier(q) => q.range(),
        }
    }
}

impl Root {
    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        self.0.children().filter_map(Rule::cast)
    }

    /// Body of a grammar written as one bare expression.
    pub fn expr(&self) -> Option<Alt> {
        child(&self.0)
    }
}

impl Rule {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn body(&self) -> Option<Alt> {
        child(&self.0)
    }
}

impl Alt {
    pub fn branches(&self) -> impl Iterator<Item = Branch> + '_ {
        self.0.children().filter_map(Branch::cast)
    }
}

impl Branch {
    pub fn atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.0.children().filter_map(Atom::cast)
    }
}

impl Group {
    pub fn body(&self) -> Option<Alt> {
        child(&self.0)
    }
}

impl Quantifier {
    pub fn inner(&self) -> Option<Atom> {
        self.0.children().find_map(Atom::cast)
    }

    pub fn repetition(&self) -> Option<Repetition> {
        self.0
            .children_with_tokens()
            .filter_map(rowan::NodeOrToken::into_token)
            .find_map(|t| Repetition::from_kind(t.kind()))
    }
}

impl Ref {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}
