use super::escape_jsdoc;

/// The provenance comment every generated file starts with.
pub fn emit_header(source: &str) -> String {
    format!(
        "/**\n * THIS FILE IS AUTOMATICALLY GENERATED FROM: {}\n * DO NOT EDIT MANUALLY\n */",
        escape_jsdoc(source.to_string())
    )
}
