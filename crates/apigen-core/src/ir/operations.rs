use super::schemas::TypeExpr;

pub use crate::parse::operation::HttpMethod;

/// A fully resolved API operation, ready to become one function.
#[derive(Debug, Clone)]
pub struct IrOperation {
    /// Final, collision-free camelCase function name.
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    /// Path parameters first, then query parameters.
    pub parameters: Vec<IrParameter>,
    pub request_body: Option<IrRequestBody>,
    pub return_type: TypeExpr,
}

impl IrOperation {
    pub fn path_params(&self) -> impl Iterator<Item = &IrParameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == IrParameterLocation::Path)
    }

    pub fn query_params(&self) -> impl Iterator<Item = &IrParameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == IrParameterLocation::Query)
    }
}

/// A resolved path/query parameter.
#[derive(Debug, Clone)]
pub struct IrParameter {
    /// Identifier used in the signature and in generated expressions.
    pub name: String,
    /// Name as written in the document (URL template token or query key).
    pub original_name: String,
    pub location: IrParameterLocation,
    pub param_type: TypeExpr,
    pub required: bool,
    /// Array-valued: the query key repeats once per element.
    pub is_array: bool,
    pub description: Option<String>,
}

/// Parameter locations that make it into a function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrParameterLocation {
    Path,
    Query,
}

/// A resolved JSON request body.
#[derive(Debug, Clone)]
pub struct IrRequestBody {
    /// Identifier of the body parameter (`data` unless taken).
    pub param_name: String,
    pub body_type: TypeExpr,
    pub description: Option<String>,
}
