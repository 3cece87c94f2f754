use minijinja::context;

use apigen_core::error::GeneratorError;

use super::header::emit_header;
use super::{environment, finish, template_error};

/// Emit `index.ts`, re-exporting the declarations and the API functions.
pub fn emit_index(source: &str, types_module: &str) -> Result<String, GeneratorError> {
    let mut env = environment();
    env.add_template("index.ts.j2", include_str!("../../templates/index.ts.j2"))
        .expect("template should be valid");
    let tmpl = env.get_template("index.ts.j2").map_err(template_error)?;

    let rendered = tmpl
        .render(context! {
            header => emit_header(source),
            types_module => types_module,
        })
        .map_err(template_error)?;
    Ok(finish(rendered))
}
