use std::io::Write;
use std::path::Path;

use indoc::indoc;
use tempfile::NamedTempFile;

use super::manifest_loader::{LoadError, load_manifest};

const SHAPE_MANIFEST: &str = indoc! {r#"
    {
      "syntax": "Shape",
      "builder": "ShapeBuilder",
      "grammar": "shape : AddCircle WithRadius ;",
      "actions": [
        { "method": "add_circle", "doc": "Add a circle" },
        { "method": "set_circle_radius", "name": "WithRadius",
          "params": [{ "name": "radius", "type": "i32" }] }
      ]
    }
"#};

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_manifest_and_catalog() {
    let file = temp_file(SHAPE_MANIFEST);
    let loaded = load_manifest(file.path(), None).unwrap();

    assert_eq!(loaded.manifest.syntax, "Shape");
    assert_eq!(loaded.manifest.builder, "ShapeBuilder");
    assert_eq!(loaded.grammar(), "shape : AddCircle WithRadius ;");
    assert_eq!(loaded.catalog.len(), 2);
    assert!(loaded.catalog.lookup("WithRadius").is_some());
}

#[test]
fn grammar_file_overrides_manifest() {
    let file = temp_file(SHAPE_MANIFEST);
    let grammar = temp_file("AddCircle");
    let loaded = load_manifest(file.path(), Some(grammar.path())).unwrap();

    assert_eq!(loaded.grammar(), "AddCircle");
}

#[test]
fn missing_file() {
    let err = load_manifest(Path::new("/nonexistent/shape.json"), None).unwrap_err();

    assert!(matches!(err, LoadError::Read { .. }));
    assert!(
        err.to_string()
            .starts_with("failed to read '/nonexistent/shape.json': ")
    );
}

#[test]
fn malformed_json() {
    let file = temp_file(r#"{ "builder": "B" "#);
    let err = load_manifest(file.path(), None).unwrap_err();

    assert!(matches!(err, LoadError::Manifest { .. }));
    assert!(err.to_string().contains("manifest parse error"));
}

#[test]
fn duplicate_action_ids() {
    let file = temp_file(indoc! {r#"
        {
          "builder": "B",
          "grammar": "A",
          "actions": [
            { "method": "a" },
            { "method": "other", "id": "A" }
          ]
        }
    "#});
    let err = load_manifest(file.path(), None).unwrap_err();

    let path = file.path().display().to_string();
    assert_eq!(
        err.to_string(),
        format!("invalid manifest '{path}': duplicate action id `A`")
    );
}
