//! Expansion of `#[syntax]`: catalog from the impl block, states from the grammar.

use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use snout_compiler::{RustEmitConfig, SyntaxBuilder};
use snout_core::{
    ActionCatalog, ActionMetadata, CallStyle, CatalogError, CatalogProvider, TypeDescriptor,
};
use syn::parse::Parser;
use syn::spanned::Spanned;
use syn::{
    Attribute, Expr, FnArg, GenericParam, ImplItem, ImplItemFn, ItemImpl, Lit, LitStr, Meta, Pat,
    Type,
};

const ACTION_ATTR: &str = "action";

#[derive(Default)]
struct SyntaxArgs {
    name: Option<LitStr>,
    grammar: Option<LitStr>,
    vis: Option<LitStr>,
}

/// Actions collected from an impl block.
struct ImplCatalog {
    builder: String,
    grammar: String,
    actions: Vec<ActionMetadata>,
}

impl CatalogProvider for ImplCatalog {
    fn builder_type(&self) -> &str {
        &self.builder
    }

    fn grammar(&self) -> &str {
        &self.grammar
    }

    fn catalog(&self) -> Result<ActionCatalog, CatalogError> {
        ActionCatalog::new(self.actions.clone())
    }
}

pub fn syntax(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let args = parse_args(attr)?;
    let mut item: ItemImpl = syn::parse2(item)?;

    let Some(grammar) = args.grammar else {
        return Err(syn::Error::new(
            Span::call_site(),
            "missing `grammar = \"...\"` argument",
        ));
    };
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new(
            item.generics.span(),
            "generic builder types are not supported",
        ));
    }
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new(path.span(), "expected an inherent impl block"));
    }

    let name = match &args.name {
        Some(name) => name.value(),
        None => format!("{}Syntax", type_name(&item.self_ty)?),
    };

    let mut actions = Vec::new();
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        if let Some(action) = take_action(method)? {
            actions.push(action);
        }
    }
    let provider = ImplCatalog {
        builder: item.self_ty.to_token_stream().to_string(),
        grammar: grammar.value(),
        actions,
    };

    let states = generate(&provider, &name, args.vis.as_ref())
        .map_err(|message| syn::Error::new(grammar.span(), message))?;

    Ok(quote! {
        #item
        #states
    })
}

fn generate(
    provider: &impl CatalogProvider,
    name: &str,
    vis: Option<&LitStr>,
) -> Result<TokenStream, String> {
    let catalog = provider.catalog().map_err(|e| e.to_string())?;
    let source = provider.grammar();

    let compiled = SyntaxBuilder::new(source, &catalog)
        .base_name(name)
        .prune_unreachable(true)
        .compile()
        .map_err(|e| match e.diagnostics() {
            Some(diagnostics) => format!("{e}\n{}", diagnostics.render(source)),
            None => e.to_string(),
        })?;

    let mut config = RustEmitConfig::new(provider.builder_type()).header(false);
    if let Some(vis) = vis {
        config = config.visibility(vis.value());
    }
    let code = compiled.emit_rust(&config).map_err(|e| e.to_string())?;
    code.parse()
        .map_err(|e| format!("generated code does not parse: {e}"))
}

fn parse_args(attr: TokenStream) -> syn::Result<SyntaxArgs> {
    let mut args = SyntaxArgs::default();
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            args.name = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("grammar") {
            args.grammar = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("vis") {
            args.vis = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unsupported syntax argument"));
        }
        Ok(())
    });
    parser.parse2(attr)?;
    Ok(args)
}

fn type_name(ty: &Type) -> syn::Result<String> {
    if let Type::Path(path) = ty
        && let Some(segment) = path.path.segments.last()
    {
        return Ok(segment.ident.to_string());
    }
    Err(syn::Error::new(
        ty.span(),
        "cannot derive a state name, pass `name = \"...\"`",
    ))
}

/// Remove `#[action]` from the method and describe it, if it was there.
fn take_action(method: &mut ImplItemFn) -> syn::Result<Option<ActionMetadata>> {
    let Some(index) = method
        .attrs
        .iter()
        .position(|a| a.path().is_ident(ACTION_ATTR))
    else {
        return Ok(None);
    };
    let attr = method.attrs.remove(index);

    let sig = &method.sig;
    match sig.inputs.first() {
        Some(FnArg::Receiver(r)) if r.reference.is_some() && r.mutability.is_some() => {}
        _ => {
            return Err(syn::Error::new(
                sig.ident.span(),
                "actions must take `&mut self`",
            ));
        }
    }
    if let Some(clause) = &sig.generics.where_clause {
        return Err(syn::Error::new(
            clause.span(),
            "where clauses are not supported on actions, use inline bounds",
        ));
    }

    let mut action = ActionMetadata::new(sig.ident.to_string());
    let mut generic_names = Vec::new();
    for param in &sig.generics.params {
        let GenericParam::Type(param) = param else {
            return Err(syn::Error::new(
                param.span(),
                "only type parameters are supported on actions",
            ));
        };
        let mut generic = TypeDescriptor::generic(param.ident.to_string());
        for bound in &param.bounds {
            generic = generic.with_bound(bound.to_token_stream().to_string());
        }
        generic_names.push(param.ident.to_string());
        action = action.generic(generic);
    }

    for input in sig.inputs.iter().skip(1) {
        let FnArg::Typed(typed) = input else {
            continue;
        };
        let Pat::Ident(pat) = typed.pat.as_ref() else {
            return Err(syn::Error::new(
                typed.pat.span(),
                "action parameters must be plain identifiers",
            ));
        };
        action = action.param(pat.ident.to_string(), descriptor(&typed.ty, &generic_names));
    }

    let doc = doc_comment(&method.attrs);
    if !doc.is_empty() {
        action = action.doc(doc);
    }

    apply_action_args(&attr, action).map(Some)
}

/// Bare references to the action's own type parameters stay generic.
/// Everything else is passed through as written.
fn descriptor(ty: &Type, generics: &[String]) -> TypeDescriptor {
    if let Type::Path(path) = ty
        && path.qself.is_none()
        && let Some(ident) = path.path.get_ident()
        && generics.iter().any(|g| ident == g)
    {
        return TypeDescriptor::generic(ident.to_string());
    }
    TypeDescriptor::concrete(ty.to_token_stream().to_string())
}

/// `#[action(name = "...", id = "...", method)]`
fn apply_action_args(attr: &Attribute, mut action: ActionMetadata) -> syn::Result<ActionMetadata> {
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(action);
    }

    let mut name = None;
    let mut id = None;
    let mut method = false;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse::<LitStr>()?.value());
        } else if meta.path.is_ident("id") {
            id = Some(meta.value()?.parse::<LitStr>()?.value());
        } else if meta.path.is_ident("method") {
            method = true;
        } else {
            return Err(meta.error("unsupported action argument"));
        }
        Ok(())
    })?;

    if let Some(name) = name {
        action = action.display_name(name);
    }
    if let Some(id) = id {
        action = action.id(id);
    }
    if method {
        action = action.style(CallStyle::Method);
    }
    Ok(action)
}

fn doc_comment(attrs: &[Attribute]) -> String {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .map(|line| line.strip_prefix(' ').unwrap_or(&line).to_string())
        .collect();
    lines.join("\n")
}
