//! Type descriptors for action parameters and generic arguments.
//!
//! A descriptor is tri-state: a concrete (possibly generic) type, an open
//! "dynamic" marker, or a reference to a generic parameter declared by the
//! action itself. Rendering is a pure function of the descriptor.

use std::fmt;

/// Type of an action parameter or generic argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// Named type with optional generic arguments: `Vec<u8>`, `&str`.
    Concrete {
        name: String,
        args: Vec<TypeDescriptor>,
    },
    /// Untyped slot, rendered with a configurable marker.
    Dynamic,
    /// Generic parameter declared by the action: `T`, `T: Into<String>`.
    Generic { name: String, bounds: Vec<String> },
}

impl TypeDescriptor {
    pub fn concrete(name: impl Into<String>) -> Self {
        Self::Concrete {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>) -> Self {
        Self::Generic {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Adds a generic argument. No-op on non-concrete descriptors.
    pub fn with_arg(mut self, arg: TypeDescriptor) -> Self {
        if let Self::Concrete { args, .. } = &mut self {
            args.push(arg);
        }
        self
    }

    /// Adds a trait bound. No-op on non-generic descriptors.
    pub fn with_bound(mut self, bound: impl Into<String>) -> Self {
        if let Self::Generic { bounds, .. } = &mut self {
            bounds.push(bound.into());
        }
        self
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic)
    }

    /// Renders the type as it appears in a signature.
    ///
    /// Nested arguments render recursively; `Dynamic` renders as `dynamic_marker`
    /// at any depth.
    pub fn render(&self, dynamic_marker: &str) -> String {
        let mut out = String::new();
        self.render_into(&mut out, dynamic_marker);
        out
    }

    fn render_into(&self, out: &mut String, dynamic_marker: &str) {
        match self {
            Self::Concrete { name, args } => {
                out.push_str(name);
                if args.is_empty() {
                    return;
                }
                out.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    arg.render_into(out, dynamic_marker);
                }
                out.push('>');
            }
            Self::Dynamic => out.push_str(dynamic_marker),
            Self::Generic { name, .. } => out.push_str(name),
        }
    }

    /// Declaration form of a generic parameter (`T: Clone + Send`).
    ///
    /// Returns `None` for concrete and dynamic descriptors, which are passed
    /// as fixed arguments rather than declared.
    pub fn declaration(&self) -> Option<String> {
        let Self::Generic { name, bounds } = self else {
            return None;
        };
        if bounds.is_empty() {
            return Some(name.clone());
        }
        Some(format!("{}: {}", name, bounds.join(" + ")))
    }

    /// Parses a parameter type.
    ///
    /// `?` is the dynamic marker. A bare name listed in `generics` becomes a
    /// generic parameter reference.
    pub fn parse(text: &str, generics: &[&str]) -> Result<Self, TypeParseError> {
        if text.trim().is_empty() {
            return Err(TypeParseError::Empty);
        }
        let mut parser = TypeParser {
            text,
            pos: 0,
            generics,
        };
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos < text.len() {
            return Err(TypeParseError::TrailingInput { offset: parser.pos });
        }
        Ok(ty)
    }

    /// Parses an entry of an action's generic parameter list.
    ///
    /// A bare identifier, optionally followed by `: Bound + Bound`, declares a
    /// generic parameter. Anything else is a fixed type argument.
    pub fn parse_generic(text: &str) -> Result<Self, TypeParseError> {
        let trimmed = text.trim();
        let (head, bounds) = match split_top_level(trimmed, ':') {
            Some((head, rest)) if is_identifier(head.trim()) => (head.trim(), Some(rest)),
            _ => (trimmed, None),
        };

        if !is_identifier(head) {
            return Self::parse(trimmed, &[]);
        }

        let bounds = match bounds {
            Some(rest) => {
                let parts = split_bounds(rest);
                if parts.iter().any(|b| b.is_empty()) {
                    return Err(TypeParseError::ExpectedName {
                        offset: trimmed.len(),
                    });
                }
                parts
            }
            None => Vec::new(),
        };

        Ok(Self::Generic {
            name: head.to_string(),
            bounds,
        })
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("?"))
    }
}

/// Error while parsing a textual type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    Empty,
    ExpectedName { offset: usize },
    UnclosedArguments { offset: usize },
    TrailingInput { offset: usize },
}

impl fmt::Display for TypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "type is empty"),
            Self::ExpectedName { offset } => write!(f, "expected type name at offset {offset}"),
            Self::UnclosedArguments { offset } => {
                write!(f, "missing closing `>` at offset {offset}")
            }
            Self::TrailingInput { offset } => {
                write!(f, "unexpected input after type at offset {offset}")
            }
        }
    }
}

impl std::error::Error for TypeParseError {}

struct TypeParser<'a> {
    text: &'a str,
    pos: usize,
    generics: &'a [&'a str],
}

impl TypeParser<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            return true;
        }
        false
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn parse_type(&mut self) -> Result<TypeDescriptor, TypeParseError> {
        self.skip_whitespace();
        if self.eat('?') {
            return Ok(TypeDescriptor::Dynamic);
        }

        let start = self.pos;
        let name = self.parse_name();
        if name.is_empty() {
            return Err(TypeParseError::ExpectedName { offset: start });
        }

        self.skip_whitespace();
        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                self.skip_whitespace();
                if self.eat(',') {
                    self.skip_whitespace();
                    if self.eat('>') {
                        break;
                    }
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(TypeParseError::UnclosedArguments { offset: self.pos });
            }
        }

        if args.is_empty() && self.generics.contains(&name.as_str()) {
            return Ok(TypeDescriptor::generic(name));
        }
        Ok(TypeDescriptor::Concrete { name, args })
    }

    /// Reads up to the next top-level `<`, `,` or `>`.
    ///
    /// Parentheses and brackets nest, so tuples, slices and `fn(..) -> R`
    /// stay inside the name.
    fn parse_name(&mut self) -> String {
        let start = self.pos;
        let mut depth = 0usize;
        let bytes = self.text.as_bytes();

        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'(' | b'[' => depth += 1,
                b')' | b']' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                b'-' if bytes.get(self.pos + 1) == Some(&b'>') => {
                    self.pos += 2;
                    continue;
                }
                b'<' | b',' | b'>' if depth == 0 => break,
                _ => {}
            }
            self.pos += 1;
        }

        self.text[start..self.pos].trim().to_string()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_') && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Splits at the first `sep` outside of `<>`, `()` and `[]`, skipping `::`.
fn split_top_level(s: &str, sep: char) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' | b')' | b']' => depth -= 1,
            b':' if sep == ':' && bytes.get(i + 1) == Some(&b':') => {
                i += 2;
                continue;
            }
            c if depth == 0 && c == sep as u8 => return Some((&s[..i], &s[i + 1..])),
            _ => {}
        }
        i += 1;
    }
    None
}

fn split_bounds(s: &str) -> Vec<String> {
    let mut bounds = Vec::new();
    let mut rest = s;
    while let Some((head, tail)) = split_top_level(rest, '+') {
        bounds.push(head.trim().to_string());
        rest = tail;
    }
    bounds.push(rest.trim().to_string());
    bounds
}
