//! Shared fixtures for compiler tests.

use snout_core::utils::to_snake_case;
use snout_core::{ActionCatalog, ActionMetadata, TypeDescriptor};

use crate::analyze::{Ebnf, analyze};
use crate::diagnostics::Diagnostics;
use crate::parser::parse;

/// Catalog of property actions, one per id, in the given order.
pub fn catalog(ids: &[&str]) -> ActionCatalog {
    let actions = ids
        .iter()
        .map(|id| ActionMetadata::new(to_snake_case(id)).display_name(*id))
        .collect();
    ActionCatalog::new(actions).unwrap()
}

/// The circle/rectangle/polygon builder used across pipeline tests.
pub fn shape_catalog() -> ActionCatalog {
    ActionCatalog::new(vec![
        ActionMetadata::new("add_circle").doc("Add a circle"),
        ActionMetadata::new("set_circle_radius")
            .display_name("WithRadius")
            .param("radius", TypeDescriptor::concrete("i32")),
        ActionMetadata::new("add_rectangle"),
        ActionMetadata::new("set_rectangle_width")
            .display_name("WithWidth")
            .param("width", TypeDescriptor::concrete("i32")),
        ActionMetadata::new("set_rectangle_height")
            .display_name("WithHeight")
            .param("height", TypeDescriptor::concrete("i32")),
        ActionMetadata::new("add_polygon"),
        ActionMetadata::new("add_point")
            .param("x", TypeDescriptor::concrete("i32"))
            .param("y", TypeDescriptor::concrete("i32")),
    ])
    .unwrap()
}

pub const SHAPE_GRAMMAR: &str = "
    shape     : circle | rectangle | polygon ;
    circle    : AddCircle WithRadius ;
    rectangle : AddRectangle WithWidth WithHeight ;
    polygon   : AddPolygon AddPoint+ ;
";

#[track_caller]
pub fn analyzed(source: &str, catalog: &ActionCatalog) -> (Ebnf, Diagnostics) {
    let (parse, diagnostics) = parse(source).unwrap();
    assert!(
        diagnostics.is_empty(),
        "unexpected parse diagnostics:\n{}",
        diagnostics.render(source)
    );
    analyze(&parse.root(), catalog).unwrap()
}
