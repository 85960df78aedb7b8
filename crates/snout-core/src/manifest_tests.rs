use indoc::indoc;

use crate::catalog::{CallStyle, CatalogError, CatalogProvider, TerminalId};
use crate::manifest::Manifest;
use crate::types::TypeDescriptor;

const SHAPES: &str = indoc! {r#"
    {
      "syntax": "ShapeSyntax",
      "builder": "ShapeBuilder",
      "grammar": "shape : AddCircle WithRadius ;",
      "actions": [
        { "method": "add_circle", "doc": "Add a circle" },
        { "method": "set_circle_radius", "name": "WithRadius",
          "params": [{ "name": "radius", "type": "i32" }] },
        { "method": "done", "style": "method" }
      ]
    }
"#};

#[test]
fn parses_shape_manifest() {
    let manifest = Manifest::from_json(SHAPES).unwrap();
    assert_eq!(manifest.syntax, "ShapeSyntax");
    assert_eq!(manifest.builder_type(), "ShapeBuilder");
    assert_eq!(manifest.grammar(), "shape : AddCircle WithRadius ;");
    assert_eq!(manifest.action_count(), 3);

    let catalog = manifest.catalog().unwrap();
    let circle = catalog.get(TerminalId::new(0)).unwrap();
    assert_eq!(circle.display_name, "AddCircle");
    assert_eq!(circle.documentation, "Add a circle");
    assert!(circle.is_property());

    let radius = catalog.get(TerminalId::new(1)).unwrap();
    assert_eq!(radius.id, "WithRadius");
    assert_eq!(radius.builder_method, "set_circle_radius");
    assert_eq!(radius.parameters[0].name, "radius");
    assert_eq!(radius.parameters[0].ty, TypeDescriptor::concrete("i32"));

    let done = catalog.get(TerminalId::new(2)).unwrap();
    assert_eq!(done.style, CallStyle::Method);
    assert!(!done.is_property());
}

#[test]
fn syntax_name_defaults() {
    let json = r#"{ "builder": "B", "grammar": "" }"#;
    let manifest = Manifest::from_json(json).unwrap();
    assert_eq!(manifest.syntax, "Syntax");
    assert!(manifest.catalog().unwrap().is_empty());
}

#[test]
fn params_see_declared_generics() {
    let json = indoc! {r#"
        {
          "builder": "B",
          "grammar": "Insert",
          "actions": [
            { "method": "insert", "generics": ["T: Clone"],
              "params": [{ "name": "value", "type": "Vec<T>" }, { "name": "tag", "type": "?" }] }
          ]
        }
    "#};
    let catalog = Manifest::from_json(json).unwrap().catalog().unwrap();
    let insert = catalog.get(TerminalId::new(0)).unwrap();
    assert_eq!(
        insert.generics,
        [TypeDescriptor::generic("T").with_bound("Clone")]
    );
    assert_eq!(
        insert.parameters[0].ty,
        TypeDescriptor::concrete("Vec").with_arg(TypeDescriptor::generic("T"))
    );
    assert_eq!(insert.parameters[1].ty, TypeDescriptor::Dynamic);
}

#[test]
fn invalid_type_names_action() {
    let json = indoc! {r#"
        {
          "builder": "B",
          "grammar": "",
          "actions": [{ "method": "bad", "params": [{ "name": "x", "type": "Vec<u8" }] }]
        }
    "#};
    let err = Manifest::from_json(json).unwrap().catalog().unwrap_err();
    assert!(matches!(
        &err,
        CatalogError::InvalidType { action, text, .. } if action == "bad" && text == "Vec<u8"
    ));
}

#[test]
fn duplicate_action_ids() {
    let json = indoc! {r#"
        {
          "builder": "B",
          "grammar": "",
          "actions": [{ "method": "a", "id": "X" }, { "method": "b", "id": "X" }]
        }
    "#};
    let err = Manifest::from_json(json).unwrap().catalog().unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateActionId { .. }));
}

#[test]
fn unknown_fields_are_rejected() {
    let json = r#"{ "builder": "B", "grammar": "", "colour": "red" }"#;
    let err = Manifest::from_json(json).unwrap_err();
    assert!(matches!(err, CatalogError::Json(_)));
    assert!(err.to_string().starts_with("manifest parse error: unknown field `colour`"));
}
