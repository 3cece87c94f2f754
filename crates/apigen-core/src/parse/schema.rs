use indexmap::IndexMap;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    #[serde(other)]
    Other,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The type that drives resolution: the single type, or the first
    /// non-`null` entry of a type list.
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            TypeSet::Single(t) => Some(*t),
            TypeSet::Multiple(types) => types.iter().copied().find(|t| *t != SchemaType::Null),
        }
    }
}

/// A schema node. Swagger 2 and OpenAPI 3 share this shape closely enough
/// that one struct covers both dialects.
///
/// `$ref` is kept as a plain field rather than a separate enum variant: a node
/// may carry a reference next to other keywords, and the reference wins.
///
/// Deserialization never fails. A keyword with the wrong shape (a boolean
/// `required`, a tuple-style `items` list) is dropped, and a node that is not
/// an object at all becomes the empty schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Object properties
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    // Composition
    #[serde(rename = "allOf", skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,

    #[serde(rename = "oneOf", skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,

    #[serde(rename = "anyOf", skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,

    // Enum values
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Schema::from_value(value))
    }
}

impl Schema {
    /// Shorthand for a schema with only a `type`.
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(TypeSet::Single(schema_type)),
            ..Self::default()
        }
    }

    /// Shorthand for a `$ref` node.
    pub fn from_ref(ref_path: impl Into<String>) -> Self {
        Self {
            reference: Some(ref_path.into()),
            ..Self::default()
        }
    }

    /// Read a schema node, keeping every keyword that has the expected shape.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            debug!("ignoring non-object schema node");
            return Self::default();
        };
        Self {
            reference: keyword(&mut map, "$ref"),
            schema_type: keyword(&mut map, "type"),
            format: keyword(&mut map, "format"),
            title: keyword(&mut map, "title"),
            description: keyword(&mut map, "description"),
            properties: keyword(&mut map, "properties").unwrap_or_default(),
            required: required_names(map.remove("required")),
            additional_properties: keyword(&mut map, "additionalProperties"),
            items: keyword(&mut map, "items"),
            all_of: keyword(&mut map, "allOf").unwrap_or_default(),
            one_of: keyword(&mut map, "oneOf").unwrap_or_default(),
            any_of: keyword(&mut map, "anyOf").unwrap_or_default(),
            enum_values: keyword(&mut map, "enum").unwrap_or_default(),
            example: map.remove("example"),
        }
    }

    pub fn primary_type(&self) -> Option<SchemaType> {
        self.schema_type.as_ref().and_then(TypeSet::primary)
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}

/// Take one keyword out of a schema object, or `None` when it is absent or
/// has the wrong shape.
fn keyword<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = map.remove(key)?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!("ignoring malformed `{key}` keyword: {err}");
            None
        }
    }
}

/// The string entries of a `required` list. Anything else (the Swagger 1.x
/// style `required: true` on a property) declares nothing.
fn required_names(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(names)) => names
            .into_iter()
            .filter_map(|name| match name {
                Value::String(name) => Some(name),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

/// The name a `$ref` points at: its last path segment
/// (`#/definitions/Player` → `Player`).
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}
