//! Identifier case conversion shared by catalog providers and emitters.

/// Convert a snake_case method name to a PascalCase action name.
///
/// Words are separated by `_` or `-`. Inputs without separators keep their
/// inner casing and only get the first letter raised, so `withRadius` and
/// `WithRadius` both become `WithRadius`.
///
/// # Examples
/// ```
/// use snout_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("set_circle_radius"), "SetCircleRadius");
/// assert_eq!(to_pascal_case("withRadius"), "WithRadius");
/// assert_eq!(to_pascal_case("AddCircle"), "AddCircle");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for word in s.split(['_', '-']).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Convert a PascalCase or camelCase action name to a snake_case method name.
///
/// Acronym runs stay together (`HTTPServer` → `http_server`) and digits attach
/// to the preceding word (`Point3D` → `point3_d`).
///
/// # Examples
/// ```
/// use snout_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("WithRadius"), "with_radius");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            result.push('_');
            continue;
        }
        if !c.is_uppercase() {
            result.push(c);
            continue;
        }

        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let starts_word = match prev {
            None | Some('_') | Some('-') => false,
            Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
            // End of an acronym run: `HTTPServer` splits before `S`.
            Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
            Some(_) => false,
        };

        if starts_word && !result.ends_with('_') {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Escape a Rust keyword as a raw identifier (`type` → `r#type`).
///
/// `self`, `Self`, `super` and `crate` cannot be raw identifiers and get a
/// trailing underscore instead.
pub fn escape_rust_ident(name: &str) -> String {
    if !RUST_KEYWORDS.contains(&name) {
        return name.to_string();
    }
    match name {
        "self" | "Self" | "super" | "crate" => format!("{}_", name),
        _ => format!("r#{}", name),
    }
}
