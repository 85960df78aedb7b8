//! JSON manifest: grammar text plus the actions it references.
//!
//! ```json
//! {
//!   "syntax": "ShapeSyntax",
//!   "builder": "ShapeBuilder",
//!   "grammar": "shape : AddCircle WithRadius ;",
//!   "actions": [
//!     { "method": "add_circle", "doc": "Add a circle" },
//!     { "method": "set_circle_radius", "name": "WithRadius",
//!       "params": [{ "name": "radius", "type": "i32" }] }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::catalog::{ActionCatalog, ActionMetadata, CallStyle, CatalogError, CatalogProvider};
use crate::types::TypeDescriptor;

const DEFAULT_SYNTAX_NAME: &str = "Syntax";

/// Parsed manifest. Actions stay raw until [`CatalogProvider::catalog`].
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Base name of generated state types.
    pub syntax: String,
    /// Builder type the states wrap.
    pub builder: String,
    pub grammar: String,
    actions: Vec<RawAction>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawManifest = serde_json::from_str(json).map_err(CatalogError::Json)?;
        Ok(raw.into())
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

impl CatalogProvider for Manifest {
    fn builder_type(&self) -> &str {
        &self.builder
    }

    fn grammar(&self) -> &str {
        &self.grammar
    }

    fn catalog(&self) -> Result<ActionCatalog, CatalogError> {
        let entries = self
            .actions
            .iter()
            .map(RawAction::to_metadata)
            .collect::<Result<Vec<_>, _>>()?;
        ActionCatalog::new(entries)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    syntax: Option<String>,
    builder: String,
    grammar: String,
    #[serde(default)]
    actions: Vec<RawAction>,
}

impl From<RawManifest> for Manifest {
    fn from(raw: RawManifest) -> Self {
        Self {
            syntax: raw
                .syntax
                .unwrap_or_else(|| DEFAULT_SYNTAX_NAME.to_string()),
            builder: raw.builder,
            grammar: raw.grammar,
            actions: raw.actions,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAction {
    method: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    style: CallStyle,
    #[serde(default)]
    doc: String,
    #[serde(default)]
    params: Vec<RawParam>,
    #[serde(default)]
    generics: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParam {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

impl RawAction {
    fn to_metadata(&self) -> Result<ActionMetadata, CatalogError> {
        let mut action = ActionMetadata::new(&self.method)
            .style(self.style)
            .doc(&self.doc);
        if let Some(name) = &self.name {
            action = action.display_name(name);
        }
        if let Some(id) = &self.id {
            action = action.id(id);
        }

        for text in &self.generics {
            let ty = TypeDescriptor::parse_generic(text).map_err(|e| self.type_error(text, e))?;
            action = action.generic(ty);
        }

        let generic_names: Vec<String> = action
            .generic_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let generic_refs: Vec<&str> = generic_names.iter().map(String::as_str).collect();

        for param in &self.params {
            let ty = TypeDescriptor::parse(&param.type_name, &generic_refs)
                .map_err(|e| self.type_error(&param.type_name, e))?;
            action = action.param(&param.name, ty);
        }

        Ok(action)
    }

    fn type_error(&self, text: &str, source: crate::types::TypeParseError) -> CatalogError {
        CatalogError::InvalidType {
            action: self.method.clone(),
            text: text.to_string(),
            source,
        }
    }
}
