//! Identifier normalization.
//!
//! Class names are derived from schema file names and keep well-known
//! acronyms fully capitalized (`dom_string` -> `DOMString`). The rules are
//! applied in a fixed order: the exception table, then the prefix table,
//! then plain capitalization. Generated class and file names are matched by
//! downstream code, so this order must not change.

use std::collections::HashSet;

/// Historically named classes, keyed by lowercased camel-case file name.
const CLASS_NAME_EXCEPTIONS: &[(&str, &str)] = &[("htmliframeelement", "HTMLIFrameElement")];

/// Acronym prefixes, first match wins. `svgSvg` must precede `svg`.
const ACRONYM_PREFIXES: &[(&str, &str)] = &[
    ("svgsvg", "SVGSVG"),
    ("dom", "DOM"),
    ("html", "HTML"),
    ("svg", "SVG"),
    ("css", "CSS"),
    ("ui", "UI"),
];

/// Words that cannot be used as Rust identifiers in generated code.
const RESERVED_WORDS: &[&str] = &[
    "type", "match", "ref", "move", "loop", "impl", "mod", "use", "where", "fn", "in", "as",
    "self", "struct", "enum", "trait", "async", "await", "dyn", "box",
];

/// Derives the canonical class name for a schema file name.
///
/// ```
/// use ironidl_codegen::naming::class_name_for;
///
/// assert_eq!(class_name_for("dom_string"), "DOMString");
/// assert_eq!(class_name_for("html_iframe_element"), "HTMLIFrameElement");
/// assert_eq!(class_name_for("svgSvgElement"), "SVGSVGElement");
/// ```
#[must_use]
pub fn class_name_for(filename: &str) -> String {
    let raw = camel_case(filename);
    let lower = raw.to_ascii_lowercase();

    if let Some((_, name)) = CLASS_NAME_EXCEPTIONS.iter().find(|(key, _)| *key == lower) {
        return (*name).to_string();
    }

    for (prefix, acronym) in ACRONYM_PREFIXES {
        if lower.starts_with(prefix) {
            return format!("{acronym}{}", upper_first(&raw[prefix.len()..]));
        }
    }

    upper_first(&raw)
}

/// Makes a parameter name safe to use as a Rust identifier.
///
/// Reserved words get a trailing underscore; everything else passes through.
#[must_use]
pub fn identifier_for(name: &str) -> String {
    if RESERVED_WORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Converts a declaration name to a safe snake_case Rust identifier.
#[must_use]
pub fn rust_identifier(name: &str) -> String {
    let snake = to_snake_case(name);
    if snake.is_empty() {
        return "unnamed".to_string();
    }
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{snake}");
    }
    identifier_for(&snake)
}

/// Hands out unique identifiers within one scope.
///
/// A taken name gets a numeric suffix starting at `_2`.
#[derive(Debug, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    /// Creates an allocator with some names already taken.
    pub fn with_reserved<'a>(reserved: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            taken: reserved.into_iter().map(str::to_string).collect(),
        }
    }

    /// Returns true if `name` was already handed out or reserved.
    #[must_use]
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Allocates `name`, or the first free suffixed variant of it.
    pub fn allocate(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut n = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{name}_{n}");
            n += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// Converts a string to snake_case, keeping acronym runs together.
///
/// `innerHTML` becomes `inner_html` and `namespaceURI` becomes
/// `namespace_uri`.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts a string to camelCase.
///
/// The first word is lowercased; every following word is capitalized with
/// the rest of it lowercased.
#[must_use]
pub fn camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, word) in words(s).iter().enumerate() {
        let lower = word.to_ascii_lowercase();
        if i == 0 {
            result.push_str(&lower);
        } else {
            result.push_str(&upper_first(&lower));
        }
    }
    result
}

/// Splits an identifier into words.
///
/// Boundaries are non-alphanumeric characters, lower-to-upper transitions
/// and the end of an acronym run (`HTMLElement` -> `HTML`, `Element`).
fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Uppercases the first character.
fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
