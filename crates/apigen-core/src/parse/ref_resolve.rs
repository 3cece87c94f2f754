use std::collections::HashSet;

use log::warn;

use super::parameter::{Parameter, ParameterOrRef};
use super::schema::{Schema, ref_name};
use super::spec::{Definitions, Document};

/// Follow a chain of `$ref` nodes through the definitions table until a
/// schema without a reference is found.
///
/// Returns `None` for a dangling reference or a chain that loops back on
/// itself (`A -> B -> A`). A schema without `$ref` is returned as-is.
pub fn follow_schema_ref<'a>(schema: &'a Schema, definitions: &'a Definitions) -> Option<&'a Schema> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = schema;
    while let Some(ref ref_path) = current.reference {
        let name = ref_name(ref_path);
        if !visited.insert(name) {
            return None;
        }
        current = definitions.get(name)?;
    }
    Some(current)
}

/// Resolves parameter `$ref`s against the document's reusable parameters.
pub struct ParameterResolver<'a> {
    doc: &'a Document,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    /// Resolve one parameter. Dangling or cyclic references are dropped with
    /// a warning.
    pub fn resolve(&self, param: &ParameterOrRef) -> Option<Parameter> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = param;
        loop {
            match current {
                ParameterOrRef::Parameter(p) => return Some(p.as_ref().clone()),
                ParameterOrRef::Ref { ref_path } => {
                    if !visited.insert(ref_path.as_str()) {
                        warn!("circular parameter reference {ref_path}, skipping");
                        return None;
                    }
                    match self.lookup(ref_path) {
                        Some(next) => current = next,
                        None => {
                            warn!("unresolved parameter reference {ref_path}, skipping");
                            return None;
                        }
                    }
                }
            }
        }
    }

    /// Resolve a list, dropping whatever does not resolve.
    pub fn resolve_all(&self, params: &[ParameterOrRef]) -> Vec<Parameter> {
        params.iter().filter_map(|p| self.resolve(p)).collect()
    }

    fn lookup(&self, ref_path: &str) -> Option<&'a ParameterOrRef> {
        let name = ref_name(ref_path);
        if ref_path.starts_with("#/components/parameters/") {
            self.doc
                .components
                .as_ref()
                .and_then(|c| c.parameters.get(name))
        } else if ref_path.starts_with("#/parameters/") {
            self.doc.parameters.get(name)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::schema::SchemaType;

    fn defs(json: &str) -> Definitions {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_follow_chain() {
        let d = defs(
            r##"{"A": {"$ref": "#/definitions/B"}, "B": {"type": "array", "items": {"type": "string"}}}"##,
        );
        let start = Schema::from_ref("#/definitions/A");
        let target = follow_schema_ref(&start, &d).unwrap();
        assert_eq!(target.primary_type(), Some(SchemaType::Array));
    }

    #[test]
    fn test_follow_cycle_terminates() {
        let d = defs(r##"{"A": {"$ref": "#/definitions/B"}, "B": {"$ref": "#/definitions/A"}}"##);
        assert!(follow_schema_ref(&Schema::from_ref("#/definitions/A"), &d).is_none());
    }

    #[test]
    fn test_follow_dangling() {
        assert!(follow_schema_ref(&Schema::from_ref("#/definitions/Missing"), &defs("{}")).is_none());
    }

    #[test]
    fn test_resolve_parameter_refs_from_both_dialects() {
        let doc: Document = serde_json::from_str(
            r##"{
                "parameters": {"limit": {"name": "limit", "in": "query", "type": "integer"}},
                "components": {"parameters": {"page": {"name": "page", "in": "query"}}}
            }"##,
        )
        .unwrap();
        let resolver = ParameterResolver::new(&doc);
        let params = resolver.resolve_all(&[
            ParameterOrRef::Ref {
                ref_path: "#/parameters/limit".to_string(),
            },
            ParameterOrRef::Ref {
                ref_path: "#/components/parameters/page".to_string(),
            },
            ParameterOrRef::Ref {
                ref_path: "#/parameters/missing".to_string(),
            },
        ]);
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["limit", "page"]);
    }
}
