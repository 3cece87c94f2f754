use indexmap::IndexMap;
use serde_json::Value;

use crate::ir::{IrField, IrInterfaceSchema, IrOpenSchema, IrSchema, TypeExpr};
use crate::parse::schema::{AdditionalProperties, Schema, SchemaType, ref_name};
use crate::parse::spec::Definitions;

use super::name_normalizer::{normalize_name, to_type_name};

/// Resolve an optional schema node to a type expression.
///
/// An absent schema is `Unknown`. `$ref`s are never dereferenced here: a
/// reference becomes the normalized name of its target whether or not the
/// target exists, so self-referencing schemas cannot recurse.
pub fn resolve(schema: Option<&Schema>, definitions: &Definitions) -> TypeExpr {
    match schema {
        Some(schema) => resolve_schema(schema, definitions),
        None => TypeExpr::Unknown,
    }
}

/// Resolve a schema node to a type expression. Never fails: anything without
/// a usable shape becomes `Any`.
pub fn resolve_schema(schema: &Schema, definitions: &Definitions) -> TypeExpr {
    if let Some(ref ref_path) = schema.reference {
        return TypeExpr::Ref(to_type_name(ref_name(ref_path)));
    }

    // Composition
    if !schema.one_of.is_empty() {
        return union_of(&schema.one_of, definitions);
    }
    if !schema.any_of.is_empty() {
        return union_of(&schema.any_of, definitions);
    }
    if !schema.all_of.is_empty()
        && let Some(merged) = resolve_all_of(&schema.all_of, definitions)
    {
        return merged;
    }

    match schema.primary_type() {
        Some(SchemaType::String) => return string_type(&schema.enum_values),
        Some(SchemaType::Number | SchemaType::Integer) => return TypeExpr::Number,
        Some(SchemaType::Boolean) => return TypeExpr::Boolean,
        Some(SchemaType::Array) => {
            let items = resolve(schema.items.as_deref(), definitions);
            return TypeExpr::Array(Box::new(items));
        }
        _ => {}
    }

    if !schema.enum_values.is_empty() {
        if schema.schema_type.is_none() {
            return string_type(&schema.enum_values);
        }
        return TypeExpr::Union(schema.enum_values.iter().map(bare_literal).collect());
    }

    if schema.primary_type() == Some(SchemaType::Object) || !schema.properties.is_empty() {
        return object_type(schema, definitions);
    }

    TypeExpr::Any
}

fn union_of(branches: &[Schema], definitions: &Definitions) -> TypeExpr {
    TypeExpr::Union(
        branches
            .iter()
            .map(|branch| resolve_schema(branch, definitions))
            .collect(),
    )
}

/// `allOf`: reference branches become intersected base types, inline
/// branches with properties merge into one object literal. Returns `None`
/// when no branch contributes either.
fn resolve_all_of(branches: &[Schema], definitions: &Definitions) -> Option<TypeExpr> {
    let mut bases = Vec::new();
    let mut properties: IndexMap<&str, &Schema> = IndexMap::new();
    let mut required: Vec<&str> = Vec::new();

    for branch in branches {
        if let Some(ref ref_path) = branch.reference {
            bases.push(TypeExpr::Ref(to_type_name(ref_name(ref_path))));
        } else if !branch.properties.is_empty() {
            for (name, prop) in &branch.properties {
                // Overwriting an existing key keeps its original position.
                properties.insert(name.as_str(), prop);
            }
            required.extend(branch.required.iter().map(String::as_str));
        }
    }

    let inline = (!properties.is_empty()).then(|| {
        TypeExpr::Object(
            properties
                .iter()
                .map(|(name, prop)| IrField {
                    name: name.to_string(),
                    field_type: resolve_schema(prop, definitions),
                    required: required.contains(name),
                    description: prop.description.clone(),
                })
                .collect(),
        )
    });

    match (bases.is_empty(), inline) {
        (true, None) => None,
        (true, Some(object)) => Some(object),
        (false, None) if bases.len() == 1 => bases.pop(),
        (false, None) => Some(TypeExpr::Intersection(bases)),
        (false, Some(object)) => {
            bases.push(object);
            Some(TypeExpr::Intersection(bases))
        }
    }
}

fn string_type(enum_values: &[Value]) -> TypeExpr {
    if enum_values.is_empty() {
        return TypeExpr::String;
    }
    TypeExpr::Union(
        enum_values
            .iter()
            .map(|v| TypeExpr::StringLiteral(literal_text(v)))
            .collect(),
    )
}

/// Enum member of a non-string enum. Strings stay quoted so the output is
/// still a valid type.
fn bare_literal(value: &Value) -> TypeExpr {
    match value {
        Value::String(s) => TypeExpr::StringLiteral(s.clone()),
        other => TypeExpr::Literal(other.to_string()),
    }
}

fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn object_type(schema: &Schema, definitions: &Definitions) -> TypeExpr {
    if schema.properties.is_empty() {
        let value = match schema.additional_properties {
            Some(AdditionalProperties::Schema(ref inner)) => resolve_schema(inner, definitions),
            _ => TypeExpr::Any,
        };
        return TypeExpr::Record(Box::new(value));
    }
    TypeExpr::Object(fields_of(schema, definitions))
}

/// Properties of an object schema as fields, in declaration order.
pub fn fields_of(schema: &Schema, definitions: &Definitions) -> Vec<IrField> {
    schema
        .properties
        .iter()
        .map(|(name, prop)| IrField {
            name: name.clone(),
            field_type: resolve_schema(prop, definitions),
            required: schema.is_required(name),
            description: prop.description.clone(),
        })
        .collect()
}

/// Build the declaration for one entry of the definitions table. Only
/// declared properties give a definition a shape; anything else, whatever
/// its `type`, `$ref` or composition keywords, is a free-form record.
pub fn definition_to_ir_schema(name: &str, schema: &Schema, definitions: &Definitions) -> IrSchema {
    let name = normalize_name(name);
    let description = schema.description.clone().or_else(|| schema.title.clone());

    if schema.properties.is_empty() {
        return IrSchema::Open(IrOpenSchema { name, description });
    }

    IrSchema::Interface(IrInterfaceSchema {
        name,
        description,
        fields: fields_of(schema, definitions),
    })
}
