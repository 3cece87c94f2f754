use std::sync::LazyLock;

use regex::Regex;

use crate::ir::NormalizedName;

/// Words that cannot be used as a parameter name in generated TypeScript.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "let", "static", "yield", "await", "implements",
    "interface", "package", "private", "protected", "public", "arguments", "eval",
];

static CASE_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static NON_ALNUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());
static NON_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());
static UNDERSCORE_LOWER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([a-z])").unwrap());

/// Create a `NormalizedName` from an arbitrary string.
pub fn normalize_name(name: &str) -> NormalizedName {
    NormalizedName {
        original: name.to_string(),
        pascal_case: to_type_name(name),
    }
}

/// Convert an identifier to a PascalCase type name.
///
/// `player_stats` → `PlayerStats`, `get /players/{id}` → `GetPlayersId`,
/// `HTTPServer` → `Httpserver`. Idempotent, and always a valid identifier.
pub fn to_type_name(s: &str) -> String {
    // One pass can leave a single-letter segment glued to the next capital
    // (`a_b` → `AB`); the second pass folds those so the result is a fixpoint.
    let settled = pascal_segments(&pascal_segments(s));
    if settled.is_empty() {
        return "Unnamed".to_string();
    }
    if settled.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{settled}");
    }
    settled
}

/// Convert an identifier to a camelCase function name.
pub fn to_function_name(s: &str) -> String {
    let pascal = to_type_name(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => pascal,
    }
}

fn pascal_segments(s: &str) -> String {
    let bounded = CASE_BOUNDARY_RE.replace_all(s, "${1}_${2}");
    let separated = NON_ALNUM_RE.replace_all(&bounded, "_");
    separated
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

/// Turn a raw parameter name into a usable identifier.
///
/// `filter[name]` → `filterName`, `ids[]` → `ids`, `x-request-id` → `xRequestId`.
pub fn sanitize_param_name(name: &str) -> String {
    let stripped = name.replace("[]", "");
    let replaced = NON_IDENT_RE.replace_all(&stripped, "_");
    let trimmed = replaced.trim_matches('_');
    let camel = UNDERSCORE_LOWER_RE
        .replace_all(trimmed, |caps: &regex::Captures| caps[1].to_ascii_uppercase())
        .into_owned();

    if camel.is_empty() {
        return "param".to_string();
    }
    if camel.starts_with(|c: char| c.is_ascii_digit()) || RESERVED_WORDS.contains(&camel.as_str())
    {
        return format!("_{camel}");
    }
    camel
}

/// Whether `name` can be written as a bare object-literal key.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
