//! Text rendering of state descriptors.

use std::fmt::{self, Write};

use snout_core::Colors;

use super::{OperationKind, OperationTarget, StateDescriptor};

pub struct StatePrinter<'a> {
    states: &'a [StateDescriptor],
    colors: Colors,
}

impl<'a> StatePrinter<'a> {
    pub fn new(states: &'a [StateDescriptor]) -> Self {
        Self {
            states,
            colors: Colors::OFF,
        }
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> fmt::Result {
        let c = &self.colors;
        for (i, state) in self.states.iter().enumerate() {
            if i > 0 {
                writeln!(w)?;
            }
            writeln!(w, "{} {}", c.state(&state.name), c.muted(&format!("(N{})", state.node)))?;

            for op in &state.operations {
                let signature = match &op.kind {
                    OperationKind::Property => String::new(),
                    OperationKind::Method { params, generics } => {
                        let mut s = String::new();
                        if !generics.is_empty() {
                            let names: Vec<&str> =
                                generics.iter().map(|g| g.rendered.as_str()).collect();
                            write!(s, "<{}>", names.join(", "))?;
                        }
                        let params: Vec<String> =
                            params.iter().map(|p| format!("{}: {}", p.name, p.ty)).collect();
                        write!(s, "({})", params.join(", "))?;
                        s
                    }
                };
                let target = match &op.target {
                    OperationTarget::State { name, .. } => c.state(name),
                    OperationTarget::End => c.muted("end"),
                };
                writeln!(
                    w,
                    "  {}{} {} {}",
                    c.action(&op.name),
                    signature,
                    c.muted("→"),
                    target
                )?;
            }
        }
        Ok(())
    }
}
