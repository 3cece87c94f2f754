use minijinja::context;

use apigen_core::error::GeneratorError;
use apigen_core::ir::{IrField, IrSchema, IrSpec};

use super::header::emit_header;
use super::{doc_lines, environment, finish, template_error};
use crate::type_mapper::property_line;

/// Emit the declarations file: one `export interface` per definition, in
/// table order.
pub fn emit_interfaces(ir: &IrSpec, no_jsdoc: bool) -> Result<String, GeneratorError> {
    let mut env = environment();
    env.add_template(
        "interfaces.ts.j2",
        include_str!("../../templates/interfaces.ts.j2"),
    )
    .expect("template should be valid");
    let tmpl = env.get_template("interfaces.ts.j2").map_err(template_error)?;

    let schemas: Vec<minijinja::Value> = ir.schemas.iter().map(schema_to_ctx).collect();

    let rendered = tmpl
        .render(context! {
            header => emit_header(&ir.source),
            schemas => schemas,
            no_jsdoc => no_jsdoc,
        })
        .map_err(template_error)?;
    Ok(finish(rendered))
}

fn schema_to_ctx(schema: &IrSchema) -> minijinja::Value {
    let name = schema.name().pascal_case.clone();
    let doc = schema.description().map(doc_lines).unwrap_or_default();
    match schema {
        IrSchema::Interface(i) => {
            let fields: Vec<minijinja::Value> = i.fields.iter().map(field_to_ctx).collect();
            context! {
                kind => "interface",
                name => name,
                doc => doc,
                fields => fields,
            }
        }
        IrSchema::Open(_) => context! {
            kind => "open",
            name => name,
            doc => doc,
        },
    }
}

fn field_to_ctx(field: &IrField) -> minijinja::Value {
    context! {
        line => property_line(field, 1),
        doc => field.description.as_deref().map(|d| doc_lines(d).join(" ")),
    }
}
