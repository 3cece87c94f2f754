//! Swagger 2 / OpenAPI 3 reading and the translation into a client-ready IR.
//!
//! `parse` deserializes a document, `transform::transform` resolves it into
//! an [`ir::IrSpec`], and a [`CodeGenerator`] turns that into files.

pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

/// One output file, with its path relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Renders an [`ir::IrSpec`] into client source files.
pub trait CodeGenerator {
    /// Options for the emitted code.
    type Config;
    type Error: std::error::Error;

    fn generate(
        &self,
        ir: &ir::IrSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
