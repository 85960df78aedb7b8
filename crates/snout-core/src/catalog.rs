//! Action catalog: the terminal vocabulary of a grammar.
//!
//! Each entry describes one builder operation. Catalog order is terminal
//! order: entry `i` is terminal `i`, and the end-of-input marker takes the
//! first index past the catalog.

use std::fmt;

use indexmap::IndexMap;

use crate::types::{TypeDescriptor, TypeParseError};
use crate::utils::to_pascal_case;

/// Index of a terminal in the grammar's vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalId(u32);

impl TerminalId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// How an operation without arguments is exposed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStyle {
    /// Accessor-like, no argument list.
    #[default]
    Property,
    /// Always a parameterized call.
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// One builder operation usable as a grammar terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMetadata {
    /// Identifier used in grammar text.
    pub id: String,
    /// Operation name on generated states.
    pub display_name: String,
    /// Builder operation the generated operation forwards to.
    pub builder_method: String,
    pub parameters: Vec<Parameter>,
    pub generics: Vec<TypeDescriptor>,
    pub style: CallStyle,
    /// Carried verbatim onto the generated operation.
    pub documentation: String,
}

impl ActionMetadata {
    /// Action for `builder_method`, named after it in PascalCase.
    pub fn new(builder_method: impl Into<String>) -> Self {
        let builder_method = builder_method.into();
        let display_name = to_pascal_case(&builder_method);
        Self {
            id: display_name.clone(),
            display_name,
            builder_method,
            parameters: Vec::new(),
            generics: Vec::new(),
            style: CallStyle::default(),
            documentation: String::new(),
        }
    }

    /// Set the operation name. The grammar id follows unless set explicitly.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if self.id == self.display_name {
            self.id = name.clone();
        }
        self.display_name = name;
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }

    pub fn generic(mut self, ty: TypeDescriptor) -> Self {
        self.generics.push(ty);
        self
    }

    pub fn style(mut self, style: CallStyle) -> Self {
        self.style = style;
        self
    }

    pub fn doc(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Whether the operation renders as an accessor without arguments.
    pub fn is_property(&self) -> bool {
        self.parameters.is_empty() && self.generics.is_empty() && self.style == CallStyle::Property
    }

    /// Names of the generic parameters this action declares.
    pub fn generic_names(&self) -> Vec<&str> {
        self.generics
            .iter()
            .filter_map(|g| match g {
                TypeDescriptor::Generic { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Error building a catalog.
#[derive(Debug)]
pub enum CatalogError {
    DuplicateActionId {
        id: String,
    },
    InvalidType {
        action: String,
        text: String,
        source: TypeParseError,
    },
    Json(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateActionId { id } => write!(f, "duplicate action id `{id}`"),
            Self::InvalidType {
                action,
                text,
                source,
            } => write!(f, "invalid type `{text}` in action `{action}`: {source}"),
            Self::Json(e) => write!(f, "manifest parse error: {e}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DuplicateActionId { .. } => None,
            Self::InvalidType { source, .. } => Some(source),
            Self::Json(e) => Some(e),
        }
    }
}

/// Ordered, id-unique set of actions.
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    entries: Vec<ActionMetadata>,
    by_id: IndexMap<String, TerminalId>,
}

impl ActionCatalog {
    pub fn new(entries: Vec<ActionMetadata>) -> Result<Self, CatalogError> {
        let mut by_id = IndexMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let terminal = TerminalId::new(i as u32);
            if by_id.insert(entry.id.clone(), terminal).is_some() {
                return Err(CatalogError::DuplicateActionId {
                    id: entry.id.clone(),
                });
            }
        }
        Ok(Self { entries, by_id })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata for a terminal. `None` for structural terminals.
    pub fn get(&self, terminal: TerminalId) -> Option<&ActionMetadata> {
        self.entries.get(terminal.index())
    }

    pub fn lookup(&self, id: &str) -> Option<TerminalId> {
        self.by_id.get(id).copied()
    }

    /// All user-visible terminals, in index order.
    pub fn terminals(&self) -> impl Iterator<Item = TerminalId> + '_ {
        (0..self.entries.len() as u32).map(TerminalId::new)
    }

    /// The end-of-input marker, one past the last action.
    pub fn end_terminal(&self) -> TerminalId {
        TerminalId::new(self.entries.len() as u32)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TerminalId, &ActionMetadata)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (TerminalId::new(i as u32), e))
    }
}

/// Source of a grammar and the actions it is written against.
///
/// Implemented by the JSON manifest and by the attribute macro; the compiler
/// only sees the resulting catalog and grammar text.
pub trait CatalogProvider {
    /// Name of the builder type generated states wrap.
    fn builder_type(&self) -> &str;

    fn grammar(&self) -> &str;

    fn catalog(&self) -> Result<ActionCatalog, CatalogError>;
}
