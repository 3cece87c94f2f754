use log::warn;
use minijinja::context;

use apigen_core::config::ClientConfig;
use apigen_core::error::GeneratorError;
use apigen_core::ir::{HttpMethod, IrOperation, IrSpec};
use apigen_core::transform::usage::extract_from_text;

use super::header::emit_header;
use super::query::query_suffix;
use super::{doc_lines, environment, finish, template_error};
use crate::type_mapper::type_expr_to_ts;

/// The rendered `api.ts` and the import decisions behind it.
#[derive(Debug, Clone)]
pub struct ApiFile {
    pub content: String,
    /// Declared types imported from the declarations module, in first-seen order.
    pub imported_types: Vec<String>,
    /// Referenced names with no matching definition, left out of the imports.
    pub skipped_types: Vec<String>,
}

/// Emit `api.ts`: one exported async function per operation plus the
/// imports they need.
pub fn emit_api(ir: &IrSpec, config: &ClientConfig) -> Result<ApiFile, GeneratorError> {
    let mut env = environment();
    env.add_template(
        "operations.ts.j2",
        include_str!("../../templates/operations.ts.j2"),
    )
    .expect("template should be valid");
    env.add_template("api.ts.j2", include_str!("../../templates/api.ts.j2"))
        .expect("template should be valid");

    let operations: Vec<minijinja::Value> = ir.operations.iter().map(operation_to_ctx).collect();
    let functions = env
        .get_template("operations.ts.j2")
        .and_then(|tmpl| {
            tmpl.render(context! {
                operations => operations,
                http_client => config.http_client_name.clone(),
                no_jsdoc => config.no_jsdoc,
            })
        })
        .map_err(template_error)?;

    // Names seen in the generated signatures back up the schema walk.
    let mut used = ir.used_types.clone();
    used.merge(extract_from_text(&functions, &ir.definitions));
    let (imported_types, skipped_types) = used.partition(&ir.definitions);
    if !skipped_types.is_empty() {
        warn!(
            "skipped undeclared types in imports: {}",
            skipped_types.join(", ")
        );
    }

    let rendered = env
        .get_template("api.ts.j2")
        .and_then(|tmpl| {
            tmpl.render(context! {
                header => emit_header(&ir.source),
                http_client => config.http_client_name.clone(),
                http_client_import => config.http_client_import.clone(),
                type_import => type_import(&imported_types, &config.types_module),
                functions => functions.trim_end(),
            })
        })
        .map_err(template_error)?;

    Ok(ApiFile {
        content: finish(rendered),
        imported_types,
        skipped_types,
    })
}

fn type_import(names: &[String], types_module: &str) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    Some(format!(
        "import type {{\n  {}\n}} from './{types_module}';",
        names.join(",\n  ")
    ))
}

fn operation_to_ctx(op: &IrOperation) -> minijinja::Value {
    context! {
        name => op.name.clone(),
        doc => operation_doc(op),
        params => signature(op),
        return_type => type_expr_to_ts(&op.return_type),
        method => op.method.as_lower(),
        url => url_template(op),
        call_args => call_args(op),
    }
}

fn operation_doc(op: &IrOperation) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(ref summary) = op.summary {
        lines.extend(doc_lines(summary));
    }
    if let Some(ref description) = op.description {
        lines.extend(doc_lines(description));
    }
    if op.deprecated {
        lines.push("@deprecated".to_string());
    }
    lines
}

/// The parameter list: path and query parameters in order, then the body.
/// An optional parameter that precedes a required one is written
/// `name: T | undefined`, which TypeScript accepts in that position.
pub fn signature(op: &IrOperation) -> String {
    let mut params: Vec<(String, String, bool)> = op
        .parameters
        .iter()
        .map(|p| (p.name.clone(), type_expr_to_ts(&p.param_type), p.required))
        .collect();
    if let Some(ref body) = op.request_body {
        params.push((body.param_name.clone(), type_expr_to_ts(&body.body_type), true));
    }

    let last_required = params.iter().rposition(|(_, _, required)| *required);
    params
        .iter()
        .enumerate()
        .map(|(i, (name, ty, required))| {
            if *required {
                format!("{name}: {ty}")
            } else if last_required.is_some_and(|last| i < last) {
                format!("{name}: {ty} | undefined")
            } else {
                format!("{name}?: {ty}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The contents of the URL template literal: path tokens substituted with
/// their parameters, followed by the query-string interpolation.
pub fn url_template(op: &IrOperation) -> String {
    let mut url = op.path.replace('`', "\\`");
    for param in op.path_params() {
        url = url.replace(
            &format!("{{{}}}", param.original_name),
            &format!("${{{}}}", param.name),
        );
    }
    let query: Vec<_> = op.query_params().collect();
    url.push_str(&query_suffix(&query));
    url
}

fn call_args(op: &IrOperation) -> String {
    let Some(ref body) = op.request_body else {
        return String::new();
    };
    match op.method {
        // These verbs take the payload inside the request config.
        HttpMethod::Get | HttpMethod::Delete => {
            if body.param_name == "data" {
                ", { data }".to_string()
            } else {
                format!(", {{ data: {} }}", body.param_name)
            }
        }
        _ => format!(", {}", body.param_name),
    }
}
