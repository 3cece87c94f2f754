use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::components::Components;
use super::operation::PathItem;
use super::parameter::ParameterOrRef;
use super::schema::Schema;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub version: String,
}

/// A Swagger 2.0 or OpenAPI 3.x document.
///
/// Both dialects deserialize into this one struct; named schemas live in
/// `definitions` (Swagger 2) or `components.schemas` (OpenAPI 3) and are
/// merged by [`Document::definitions`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,

    #[serde(default)]
    pub info: Info,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Schema>,

    /// Swagger 2 reusable parameters.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterOrRef>,
}

/// The merged, read-only table of named schemas.
pub type Definitions = IndexMap<String, Schema>;

impl Document {
    /// Merge `components.schemas` and `definitions` into one table.
    /// OpenAPI 3 entries come first; a name defined in both keeps the
    /// OpenAPI 3 schema.
    pub fn definitions(&self) -> Definitions {
        let mut merged = Definitions::new();
        if let Some(ref components) = self.components {
            for (name, schema) in &components.schemas {
                merged.insert(name.clone(), schema.clone());
            }
        }
        for (name, schema) in &self.definitions {
            merged
                .entry(name.clone())
                .or_insert_with(|| schema.clone());
        }
        merged
    }

    /// Version string of whichever dialect the document declares.
    pub fn version(&self) -> &str {
        self.openapi
            .as_deref()
            .or(self.swagger.as_deref())
            .unwrap_or("unknown")
    }
}
