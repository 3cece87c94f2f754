use super::types::NormalizedName;

/// One emitted declaration per entry of the definitions table.
#[derive(Debug, Clone)]
pub enum IrSchema {
    /// `export interface Name { ... }`
    Interface(IrInterfaceSchema),
    /// `export interface Name { [key: string]: any; }`
    Open(IrOpenSchema),
}

impl IrSchema {
    pub fn name(&self) -> &NormalizedName {
        match self {
            IrSchema::Interface(i) => &i.name,
            IrSchema::Open(o) => &o.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            IrSchema::Interface(i) => i.description.as_deref(),
            IrSchema::Open(o) => o.description.as_deref(),
        }
    }
}

/// A schema with declared properties.
#[derive(Debug, Clone)]
pub struct IrInterfaceSchema {
    pub name: NormalizedName,
    pub description: Option<String>,
    pub fields: Vec<IrField>,
}

/// A schema without declared properties.
#[derive(Debug, Clone)]
pub struct IrOpenSchema {
    pub name: NormalizedName,
    pub description: Option<String>,
}

/// A property of an object type, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct IrField {
    /// The property key exactly as it appears in the document.
    pub name: String,
    pub field_type: TypeExpr,
    pub required: bool,
    pub description: Option<String>,
}

/// A resolved type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    String,
    Number,
    Boolean,
    /// A quoted string literal, e.g. an enum member.
    StringLiteral(String),
    /// An unquoted literal (`1`, `true`, `null`).
    Literal(String),
    /// A named schema (already PascalCase).
    Ref(String),
    Array(Box<TypeExpr>),
    /// Inline object literal.
    Object(Vec<IrField>),
    /// `Record<string, T>`
    Record(Box<TypeExpr>),
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    /// No schema was given at all.
    Unknown,
    /// A schema was given but carried no usable structure.
    Any,
}

impl TypeExpr {
    /// Whether the rendered expression contains a top-level `|` or `&`, and
    /// so needs parentheses before an array suffix. A single-variant union or
    /// intersection renders as its only member, so it is looked through.
    pub fn is_compound(&self) -> bool {
        match self {
            TypeExpr::Union(variants) => match variants.as_slice() {
                [only] => only.is_compound(),
                _ => variants.len() > 1,
            },
            // Unions inside an intersection are already parenthesized.
            TypeExpr::Intersection(variants) => match variants.as_slice() {
                [only] => only.is_compound() && !only.is_union(),
                _ => variants.len() > 1,
            },
            _ => false,
        }
    }

    /// Whether the rendered expression contains a top-level `|`.
    pub fn is_union(&self) -> bool {
        match self {
            TypeExpr::Union(variants) => match variants.as_slice() {
                [only] => only.is_union(),
                _ => variants.len() > 1,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<TypeExpr> {
        names.iter().map(|n| TypeExpr::Ref(n.to_string())).collect()
    }

    #[test]
    fn test_single_variant_wrappers_are_looked_through() {
        let wrapped_intersection = TypeExpr::Union(vec![TypeExpr::Intersection(refs(&["A", "B"]))]);
        assert!(wrapped_intersection.is_compound());
        assert!(!wrapped_intersection.is_union());

        let wrapped_union = TypeExpr::Union(vec![TypeExpr::Union(vec![
            TypeExpr::String,
            TypeExpr::Number,
        ])]);
        assert!(wrapped_union.is_compound());
        assert!(wrapped_union.is_union());

        let single = TypeExpr::Intersection(vec![TypeExpr::Union(refs(&["A"]))]);
        assert!(!single.is_compound());
        assert!(!single.is_union());

        let parenthesized = TypeExpr::Intersection(vec![TypeExpr::Union(refs(&["A", "B"]))]);
        assert!(!parenthesized.is_compound());
        assert!(!parenthesized.is_union());
    }
}
