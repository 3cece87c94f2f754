use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::{JSON_MEDIA_TYPE, MediaType};
use super::schema::Schema;

/// A response definition. OpenAPI 3 responses nest the payload under
/// `content`; Swagger 2 responses carry `schema` directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Response {
    /// Schema of the JSON payload, from either dialect.
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content
            .get(JSON_MEDIA_TYPE)
            .and_then(|mt| mt.schema.as_ref())
            .or(self.schema.as_ref())
    }
}
