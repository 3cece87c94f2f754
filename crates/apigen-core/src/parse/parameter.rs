use serde::{Deserialize, Serialize};

use super::schema::{Schema, TypeSet};

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
    /// Swagger 2 request body.
    Body,
    /// Swagger 2 form field.
    FormData,
    #[serde(other)]
    Other,
}

/// An API parameter. Swagger 2 parameters carry their type inline
/// (`type`/`items`/`enum`); OpenAPI 3 parameters wrap it in `schema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    // Swagger 2 inline typing
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub legacy_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
}

impl Parameter {
    /// The schema describing this parameter's value. Falls back to the
    /// Swagger 2 inline keywords, and to a plain `string` when neither is set.
    pub fn effective_schema(&self) -> Schema {
        if let Some(ref schema) = self.schema {
            return schema.clone();
        }
        Schema {
            schema_type: Some(
                self.legacy_type
                    .clone()
                    .unwrap_or(TypeSet::Single(super::schema::SchemaType::String)),
            ),
            items: self.items.clone(),
            enum_values: self.enum_values.clone(),
            ..Schema::default()
        }
    }
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Box<Parameter>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::schema::SchemaType;

    #[test]
    fn test_legacy_parameter_schema() {
        let param: Parameter = serde_json::from_str(
            r#"{"name": "ids", "in": "query", "type": "array", "items": {"type": "integer"}}"#,
        )
        .unwrap();
        let schema = param.effective_schema();
        assert_eq!(schema.primary_type(), Some(SchemaType::Array));
        assert_eq!(
            schema.items.unwrap().primary_type(),
            Some(SchemaType::Integer)
        );
    }

    #[test]
    fn test_untyped_parameter_defaults_to_string() {
        let param: Parameter = serde_json::from_str(r#"{"name": "id", "in": "path"}"#).unwrap();
        assert_eq!(
            param.effective_schema().primary_type(),
            Some(SchemaType::String)
        );
    }

    #[test]
    fn test_form_data_location() {
        let param: Parameter =
            serde_json::from_str(r#"{"name": "file", "in": "formData"}"#).unwrap();
        assert_eq!(param.location, ParameterLocation::FormData);
    }

    #[test]
    fn test_parameter_ref() {
        let param: ParameterOrRef =
            serde_json::from_str(r##"{"$ref": "#/parameters/limit"}"##).unwrap();
        assert!(matches!(param, ParameterOrRef::Ref { .. }));
    }
}
