use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;
use serde::Serialize;

use crate::parse::schema::{AdditionalProperties, Schema, ref_name};
use crate::parse::spec::Definitions;

use super::name_normalizer::to_type_name;

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*""#).unwrap());
static DELIMITED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][A-Za-z0-9]*)(?:[\s\[\]<>{}();,?:|&]|$)").unwrap()
});
static COLON_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*([A-Z][A-Za-z0-9]*)").unwrap());

/// Named types referenced by generated code, in first-seen order.
///
/// May hold names that are not declared anywhere; [`UsedTypes::partition`]
/// separates those out before an import list is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UsedTypes(IndexSet<String>);

impl UsedTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn merge(&mut self, other: UsedTypes) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Split into names that match a declared definition and names that
    /// don't, both in first-seen order.
    pub fn partition(&self, definitions: &Definitions) -> (Vec<String>, Vec<String>) {
        let declared = declared_names(definitions);
        self.0
            .iter()
            .cloned()
            .partition(|name| declared.contains(name.as_str()))
    }
}

impl FromIterator<String> for UsedTypes {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Normalized names of every definition.
pub fn declared_names(definitions: &Definitions) -> HashSet<String> {
    definitions.keys().map(|k| to_type_name(k)).collect()
}

/// Collect every named type a schema node references, at any depth.
///
/// References are not followed into their targets, so recursive schemas
/// terminate. Only targets present in `definitions` are collected.
pub fn extract_from_schema(schema: &Schema, definitions: &Definitions) -> UsedTypes {
    let mut used = UsedTypes::new();
    walk_schema(schema, definitions, &mut used);
    used
}

fn walk_schema(schema: &Schema, definitions: &Definitions, used: &mut UsedTypes) {
    if let Some(ref ref_path) = schema.reference {
        let target = ref_name(ref_path);
        if definitions.contains_key(target) {
            used.insert(to_type_name(target));
        }
    }
    if let Some(ref items) = schema.items {
        walk_schema(items, definitions, used);
    }
    for prop in schema.properties.values() {
        walk_schema(prop, definitions, used);
    }
    if let Some(AdditionalProperties::Schema(ref inner)) = schema.additional_properties {
        walk_schema(inner, definitions, used);
    }
    for branch in schema
        .all_of
        .iter()
        .chain(&schema.one_of)
        .chain(&schema.any_of)
    {
        walk_schema(branch, definitions, used);
    }
}

/// Scan generated TypeScript for capitalized identifiers that name a
/// declared definition.
///
/// Quoted string literals are skipped. The result is filtered to real
/// definitions, so at worst it repeats a name already collected elsewhere.
pub fn extract_from_text(text: &str, definitions: &Definitions) -> UsedTypes {
    let declared = declared_names(definitions);
    let code = QUOTED_RE.replace_all(text, "''");

    DELIMITED_NAME_RE
        .captures_iter(&code)
        .chain(COLON_NAME_RE.captures_iter(&code))
        .map(|caps| caps[1].to_string())
        .filter(|name| declared.contains(name))
        .collect()
}

/// Every named type reachable from `used` through the definitions table,
/// including `used` itself.
pub fn expand_transitive(used: &UsedTypes, definitions: &Definitions) -> UsedTypes {
    let by_name: HashMap<String, &Schema> = definitions
        .iter()
        .map(|(k, schema)| (to_type_name(k), schema))
        .collect();

    let mut reachable = UsedTypes::new();
    let mut pending: Vec<String> = used.iter().map(str::to_string).collect();
    while let Some(name) = pending.pop() {
        let Some(schema) = by_name.get(&name) else {
            continue;
        };
        if !reachable.insert(name) {
            continue;
        }
        for next in extract_from_schema(schema, definitions).iter() {
            if !reachable.contains(next) {
                pending.push(next.to_string());
            }
        }
    }
    reachable
}
