pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod spec;

use crate::error::ParseError;
use spec::Document;

/// Parse a Swagger/OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<Document, ParseError> {
    let doc: Document = serde_yaml_ng::from_str(input)?;
    Ok(doc)
}

/// Parse a Swagger/OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    let doc: Document = serde_json::from_str(input)?;
    Ok(doc)
}

/// Parse JSON, falling back to YAML when the text is not JSON. Used for
/// documents whose format is not known up front (fetched over HTTP).
pub fn from_any(input: &str) -> Result<Document, ParseError> {
    match from_json(input) {
        Ok(doc) => Ok(doc),
        Err(json_err) => from_yaml(input).map_err(|_| json_err),
    }
}
