use std::fs;
use std::io::{self, Read};
use std::path::Path;

use snout_core::{ActionCatalog, CatalogError, CatalogProvider, Manifest};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid manifest '{path}': {source}")]
    Manifest {
        path: String,
        #[source]
        source: CatalogError,
    },
}

/// A manifest with its catalog already validated.
#[derive(Debug)]
pub struct LoadedManifest {
    pub manifest: Manifest,
    pub catalog: ActionCatalog,
    /// Where the grammar text came from, for diagnostics.
    pub grammar_origin: String,
}

impl LoadedManifest {
    pub fn grammar(&self) -> &str {
        &self.manifest.grammar
    }
}

/// Load `manifest_path` (`-` for stdin), optionally replacing its grammar
/// with the contents of `grammar_path`.
pub fn load_manifest(
    manifest_path: &Path,
    grammar_path: Option<&Path>,
) -> Result<LoadedManifest, LoadError> {
    let json = read_input(manifest_path)?;
    let path = manifest_path.display().to_string();
    let invalid = |source| LoadError::Manifest {
        path: path.clone(),
        source,
    };

    let mut manifest = Manifest::from_json(&json).map_err(invalid)?;
    let mut grammar_origin = path.clone();
    if let Some(grammar_path) = grammar_path {
        manifest.grammar = read_input(grammar_path)?;
        grammar_origin = grammar_path.display().to_string();
    }
    let catalog = manifest.catalog().map_err(invalid)?;
    tracing::debug!(
        manifest = %path,
        actions = catalog.len(),
        "loaded manifest"
    );

    Ok(LoadedManifest {
        manifest,
        catalog,
        grammar_origin,
    })
}

fn read_input(path: &Path) -> Result<String, LoadError> {
    let read_error = |source| LoadError::Read {
        path: path.display().to_string(),
        source,
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_error)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(read_error)
}
