use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::{JSON_MEDIA_TYPE, MediaType};
use super::schema::Schema;

/// A request body definition (OpenAPI 3).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

impl RequestBody {
    /// Schema of the `application/json` payload, if any.
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content
            .get(JSON_MEDIA_TYPE)
            .and_then(|mt| mt.schema.as_ref())
    }
}
