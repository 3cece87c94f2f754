pub mod api;
pub mod header;
pub mod index;
pub mod interfaces;
pub mod query;

use apigen_core::error::GeneratorError;
use minijinja::Environment;

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// Template environment shared by all emitters.
fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    env
}

fn template_error(err: minijinja::Error) -> GeneratorError {
    GeneratorError::Template(err.to_string())
}

/// Normalize trailing whitespace so every file ends with exactly one newline.
fn finish(rendered: String) -> String {
    let mut out = rendered.trim_end().to_string();
    out.push('\n');
    out
}

/// Split free text into JSDoc lines, dropping blank ones.
fn doc_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .map(String::from)
        .collect()
}
