use proc_macro::TokenStream;

mod expand;


/// Generate fluent states for a builder from a grammar over its actions.
///
/// Usage:
///
/// ```ignore
/// #[snout_macros::syntax(name = "Shape", grammar = "shape : AddCircle WithRadius ;")]
/// impl ShapeBuilder {
///     #[action]
///     pub fn add_circle(&mut self) { /* ... */ }
///
///     #[action(name = "WithRadius")]
///     pub fn set_circle_radius(&mut self, radius: i32) { /* ... */ }
/// }
/// ```
///
/// Methods tagged `#[action]` become grammar terminals named after the
/// method in PascalCase. `#[action(name = "...", id = "...", method)]`
/// overrides the operation name, the grammar identifier and the call style.
/// The entry state is `name`, defaulting to the builder type plus `Syntax`.
#[proc_macro_attribute]
pub fn syntax(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand::syntax(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
