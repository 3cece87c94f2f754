use log::debug;

use apigen_core::config::ClientConfig;
use apigen_core::error::GeneratorError;
use apigen_core::ir::IrSpec;
use apigen_core::{CodeGenerator, GeneratedFile};

use crate::emitters;

/// TypeScript/axios code generator.
pub struct AxiosClientGenerator;

/// Files produced by one run, with the import report for `api.ts`.
#[derive(Debug, Clone)]
pub struct Generation {
    pub files: Vec<GeneratedFile>,
    pub imported_types: Vec<String>,
    pub skipped_types: Vec<String>,
}

impl AxiosClientGenerator {
    /// Generate the declarations file, `api.ts` and `index.ts`.
    pub fn run(&self, ir: &IrSpec, config: &ClientConfig) -> Result<Generation, GeneratorError> {
        let interfaces = emitters::interfaces::emit_interfaces(ir, config.no_jsdoc)?;
        let api = emitters::api::emit_api(ir, config)?;
        let index = emitters::index::emit_index(&ir.source, &config.types_module)?;
        debug!(
            "rendered {} declarations and {} functions",
            ir.schemas.len(),
            ir.operations.len()
        );

        Ok(Generation {
            files: vec![
                GeneratedFile {
                    path: format!("{}.ts", config.types_module),
                    content: interfaces,
                },
                GeneratedFile {
                    path: "api.ts".to_string(),
                    content: api.content,
                },
                GeneratedFile {
                    path: "index.ts".to_string(),
                    content: index,
                },
            ],
            imported_types: api.imported_types,
            skipped_types: api.skipped_types,
        })
    }
}

impl CodeGenerator for AxiosClientGenerator {
    type Config = ClientConfig;
    type Error = GeneratorError;

    fn generate(
        &self,
        ir: &IrSpec,
        config: &ClientConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        Ok(self.run(ir, config)?.files)
    }
}
