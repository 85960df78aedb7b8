use crate::catalog::{ActionCatalog, ActionMetadata, CallStyle, CatalogError, TerminalId};
use crate::types::TypeDescriptor;

fn shape_actions() -> Vec<ActionMetadata> {
    vec![
        ActionMetadata::new("add_circle").doc("Add a circle"),
        ActionMetadata::new("set_circle_radius")
            .display_name("WithRadius")
            .param("radius", TypeDescriptor::concrete("i32")),
        ActionMetadata::new("add_rectangle"),
    ]
}

#[test]
fn names_default_from_method() {
    let action = ActionMetadata::new("add_circle");
    assert_eq!(action.builder_method, "add_circle");
    assert_eq!(action.display_name, "AddCircle");
    assert_eq!(action.id, "AddCircle");
    assert_eq!(action.style, CallStyle::Property);
}

#[test]
fn display_name_carries_default_id() {
    let action = ActionMetadata::new("set_circle_radius").display_name("WithRadius");
    assert_eq!(action.id, "WithRadius");

    let explicit = ActionMetadata::new("set_circle_radius")
        .id("radius")
        .display_name("WithRadius");
    assert_eq!(explicit.id, "radius");
    assert_eq!(explicit.display_name, "WithRadius");
}

#[test]
fn property_requires_no_arguments() {
    assert!(ActionMetadata::new("a").is_property());
    assert!(!ActionMetadata::new("a").style(CallStyle::Method).is_property());
    assert!(
        !ActionMetadata::new("a")
            .param("x", TypeDescriptor::concrete("i32"))
            .is_property()
    );
    assert!(
        !ActionMetadata::new("a")
            .generic(TypeDescriptor::generic("T"))
            .is_property()
    );
}

#[test]
fn catalog_order_is_terminal_order() {
    let catalog = ActionCatalog::new(shape_actions()).unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.lookup("AddCircle"), Some(TerminalId::new(0)));
    assert_eq!(catalog.lookup("WithRadius"), Some(TerminalId::new(1)));
    assert_eq!(catalog.lookup("AddRectangle"), Some(TerminalId::new(2)));
    assert_eq!(catalog.lookup("Missing"), None);
    assert_eq!(catalog.end_terminal(), TerminalId::new(3));
    assert!(catalog.get(catalog.end_terminal()).is_none());

    let ids: Vec<_> = catalog.terminals().map(TerminalId::index).collect();
    assert_eq!(ids, [0, 1, 2]);
}

#[test]
fn duplicate_ids_are_rejected() {
    let actions = vec![
        ActionMetadata::new("first").id("Same"),
        ActionMetadata::new("second").id("Same"),
    ];

    let err = ActionCatalog::new(actions).unwrap_err();
    assert!(matches!(&err, CatalogError::DuplicateActionId { id } if id == "Same"));
    assert_eq!(err.to_string(), "duplicate action id `Same`");
}

#[test]
fn generic_names_skip_fixed_arguments() {
    let action = ActionMetadata::new("insert")
        .generic(TypeDescriptor::generic("K"))
        .generic(TypeDescriptor::concrete("String"))
        .generic(TypeDescriptor::generic("V").with_bound("Clone"));
    assert_eq!(action.generic_names(), ["K", "V"]);
}
