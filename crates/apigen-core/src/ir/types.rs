use std::fmt;

use crate::parse::spec::Definitions;
use crate::transform::usage::UsedTypes;

/// A fully resolved, generator-ready view of an OpenAPI/Swagger document.
#[derive(Debug, Clone)]
pub struct IrSpec {
    pub info: IrInfo,
    /// Where the document came from; written into every provenance header.
    pub source: String,
    /// The merged definitions table the declarations were resolved against.
    pub definitions: Definitions,
    pub schemas: Vec<IrSchema>,
    pub operations: Vec<IrOperation>,
    /// Named types referenced by operations, collected from schema walks.
    pub used_types: UsedTypes,
}

/// API metadata.
#[derive(Debug, Clone)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}

/// A name with its casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

// Re-export schema and operation types for convenience
pub use super::operations::*;
pub use super::schemas::*;
