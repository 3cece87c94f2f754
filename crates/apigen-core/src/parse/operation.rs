use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use super::parameter::ParameterOrRef;
use super::request_body::RequestBody;
use super::response::Response;

/// HTTP methods the generator emits functions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Match a path-item key, ignoring case. Returns `None` for keys that are
    /// not one of the supported verbs (`parameters`, `head`, `x-*`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        }
    }
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Response>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
}

/// Status codes whose payload becomes the function's return type, in
/// priority order.
pub const SUCCESS_STATUSES: [&str; 3] = ["200", "201", "204"];

impl Operation {
    /// The first of the 200/201/204 responses that is present at all.
    pub fn success_response(&self) -> Option<&Response> {
        SUCCESS_STATUSES
            .iter()
            .find_map(|status| self.responses.get(*status))
    }

}

/// One entry of a path item: an operation, or any other keyword
/// (`summary`, `servers`, vendor extensions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathEntry {
    Operation(Box<Operation>),
    Other(serde_json::Value),
}

/// A path item: operations keyed by HTTP method, in document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(flatten)]
    pub entries: IndexMap<String, PathEntry>,
}

impl PathItem {
    /// Supported operations in the order they appear in the document.
    /// An operation that failed to deserialize still yields an empty
    /// operation, so it gets a function with permissive defaults.
    pub fn operations(&self) -> Vec<(HttpMethod, Operation)> {
        self.entries
            .iter()
            .filter_map(|(key, entry)| {
                let method = HttpMethod::from_key(key)?;
                let op = match entry {
                    PathEntry::Operation(op) => op.as_ref().clone(),
                    PathEntry::Other(_) => {
                        warn!("operation `{key}` could not be read, using defaults");
                        Operation::default()
                    }
                };
                Some((method, op))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_keep_document_order() {
        let item: PathItem = serde_json::from_str(
            r#"{
                "summary": "players",
                "post": {"operationId": "createPlayer"},
                "GET": {"operationId": "listPlayers"},
                "head": {},
                "parameters": []
            }"#,
        )
        .unwrap();
        let ops = item.operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].0, HttpMethod::Post);
        assert_eq!(ops[1].0, HttpMethod::Get);
        assert_eq!(ops[1].1.operation_id.as_deref(), Some("listPlayers"));
    }

    #[test]
    fn test_success_response_priority() {
        let op: Operation = serde_json::from_str(
            r#"{"responses": {"404": {"description": "missing"}, "201": {"description": "created"}}}"#,
        )
        .unwrap();
        assert_eq!(op.success_response().unwrap().description, "created");
    }
}
