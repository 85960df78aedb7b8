//! Rust emitter.
//!
//! Each state becomes a struct holding `&'b mut Builder` plus an impl whose
//! methods consume the state, forward to the builder and return the next
//! state. Property and method operations render alike: Rust calls always
//! take parentheses.

use std::collections::HashSet;
use std::fmt::{self, Write};

use snout_core::utils::{escape_rust_ident, to_snake_case};

use super::{EmitError, RustEmitConfig};
use crate::synthesize::{Operation, OperationKind, OperationTarget, StateDescriptor};

const GENERATED_HEADER: &str = "// @generated by snout. Do not edit.";

pub fn emit_rust(states: &[StateDescriptor], config: &RustEmitConfig) -> Result<String, EmitError> {
    let emitter = RustEmitter::new(config);
    let mut output = String::new();
    if config.header {
        output.push_str(GENERATED_HEADER);
        output.push_str("\n\n");
    }

    for (i, state) in states.iter().enumerate() {
        let methods = method_names(state)?;
        if i > 0 {
            output.push('\n');
        }
        emitter
            .state(&mut output, state, &methods)
            .expect("String write never fails");
    }
    Ok(output)
}

/// Rust method name per operation, rejecting collisions.
fn method_names(state: &StateDescriptor) -> Result<Vec<String>, EmitError> {
    let mut seen = HashSet::new();
    if state.is_entry() {
        seen.insert("new".to_string());
    }
    state
        .operations
        .iter()
        .map(|op| {
            let method = escape_rust_ident(&to_snake_case(&op.name));
            if !seen.insert(method.clone()) {
                return Err(EmitError::DuplicateOperation {
                    state: state.name.clone(),
                    name: method,
                });
            }
            Ok(method)
        })
        .collect()
}

struct RustEmitter<'a> {
    builder: &'a str,
    vis: String,
}

impl<'a> RustEmitter<'a> {
    fn new(config: &'a RustEmitConfig) -> Self {
        let vis = if config.visibility.is_empty() {
            String::new()
        } else {
            format!("{} ", config.visibility)
        };
        Self {
            builder: &config.builder_type,
            vis,
        }
    }

    fn state(&self, w: &mut String, state: &StateDescriptor, methods: &[String]) -> fmt::Result {
        let Self { builder, vis } = self;
        let name = &state.name;

        writeln!(w, "{vis}struct {name}<'b> {{")?;
        writeln!(w, "    builder: &'b mut {builder},")?;
        writeln!(w, "}}")?;
        writeln!(w)?;
        writeln!(w, "impl<'b> {name}<'b> {{")?;

        let mut first = true;
        if state.is_entry() {
            writeln!(w, "    {vis}fn new(builder: &'b mut {builder}) -> Self {{")?;
            writeln!(w, "        Self {{ builder }}")?;
            writeln!(w, "    }}")?;
            first = false;
        }
        for (method, op) in methods.iter().zip(&state.operations) {
            if !first {
                writeln!(w)?;
            }
            first = false;
            self.operation(w, method, op)?;
        }
        writeln!(w, "}}")
    }

    fn operation(&self, w: &mut String, method: &str, op: &Operation) -> fmt::Result {
        let Self { builder, vis } = self;

        for line in op.documentation.lines() {
            if line.is_empty() {
                writeln!(w, "    ///")?;
            } else {
                writeln!(w, "    /// {line}")?;
            }
        }

        let signature = Signature::of(&op.kind);
        let returns = match &op.target {
            OperationTarget::State { name, .. } => format!("{name}<'b>"),
            OperationTarget::End => format!("&'b mut {builder}"),
        };
        writeln!(
            w,
            "    {vis}fn {method}{}(self{}) -> {returns} {{",
            signature.declarations, signature.params
        )?;
        writeln!(
            w,
            "        self.builder.{}{}({});",
            escape_rust_ident(&op.builder_method),
            signature.turbofish,
            signature.args
        )?;
        match &op.target {
            OperationTarget::State { name, .. } => {
                writeln!(w, "        {name} {{ builder: self.builder }}")?
            }
            OperationTarget::End => writeln!(w, "        self.builder")?,
        }
        writeln!(w, "    }}")
    }
}

/// Rendered pieces of a method signature and its forwarding call.
#[derive(Default)]
struct Signature {
    /// `<T: Bound>`
    declarations: String,
    /// `, name: Type` per parameter
    params: String,
    /// `::<T, Fixed>`
    turbofish: String,
    /// `name, other`
    args: String,
}

impl Signature {
    fn of(kind: &OperationKind) -> Self {
        let OperationKind::Method { params, generics } = kind else {
            return Self::default();
        };

        let declared: Vec<&str> = generics
            .iter()
            .filter_map(|g| g.declaration.as_deref())
            .collect();
        let rendered: Vec<&str> = generics.iter().map(|g| g.rendered.as_str()).collect();
        let names: Vec<String> = params.iter().map(|p| escape_rust_ident(&p.name)).collect();

        Self {
            declarations: if declared.is_empty() {
                String::new()
            } else {
                format!("<{}>", declared.join(", "))
            },
            params: names
                .iter()
                .zip(params)
                .map(|(name, p)| format!(", {name}: {}", p.ty))
                .collect(),
            turbofish: if rendered.is_empty() {
                String::new()
            } else {
                format!("::<{}>", rendered.join(", "))
            },
            args: names.join(", "),
        }
    }
}
