use apigen_core::ir::{IrField, TypeExpr};
use apigen_core::transform::name_normalizer::is_plain_identifier;

/// Map a `TypeExpr` to its TypeScript type text.
pub fn type_expr_to_ts(ty: &TypeExpr) -> String {
    render(ty, 0)
}

fn render(ty: &TypeExpr, depth: usize) -> String {
    match ty {
        TypeExpr::String => "string".to_string(),
        TypeExpr::Number => "number".to_string(),
        TypeExpr::Boolean => "boolean".to_string(),
        TypeExpr::StringLiteral(s) => quote(s),
        TypeExpr::Literal(s) => s.clone(),
        TypeExpr::Ref(name) => name.clone(),
        TypeExpr::Unknown => "unknown".to_string(),
        TypeExpr::Any => "any".to_string(),
        TypeExpr::Array(inner) => {
            let inner_ts = render(inner, depth);
            if inner.is_compound() {
                format!("({inner_ts})[]")
            } else {
                format!("{inner_ts}[]")
            }
        }
        TypeExpr::Record(value) => format!("Record<string, {}>", render(value, depth)),
        TypeExpr::Object(fields) => render_object(fields, depth),
        TypeExpr::Union(variants) => join(variants, " | ", depth, false),
        TypeExpr::Intersection(parts) => join(parts, " & ", depth, true),
    }
}

fn join(members: &[TypeExpr], sep: &str, depth: usize, wrap_unions: bool) -> String {
    if members.is_empty() {
        return "never".to_string();
    }
    members
        .iter()
        .map(|m| {
            let text = render(m, depth);
            if wrap_unions && m.is_union() {
                format!("({text})")
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join(sep)
}

fn render_object(fields: &[IrField], depth: usize) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }
    let indent = "  ".repeat(depth + 1);
    let mut out = String::from("{\n");
    for field in fields {
        out.push_str(&indent);
        out.push_str(&property_line(field, depth + 1));
        out.push('\n');
    }
    out.push_str(&"  ".repeat(depth));
    out.push('}');
    out
}

/// One `key?: Type;` member, without leading indentation. `depth` is the
/// nesting level of the member itself.
pub fn property_line(field: &IrField, depth: usize) -> String {
    format!(
        "{}{}: {};",
        property_key(&field.name),
        if field.required { "" } else { "?" },
        render(&field.field_type, depth)
    )
}

/// A property key, quoted when it is not a plain identifier.
pub fn property_key(name: &str) -> String {
    if is_plain_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Single-quoted string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: TypeExpr, required: bool) -> IrField {
        IrField {
            name: name.to_string(),
            field_type: ty,
            required,
            description: None,
        }
    }

    #[test]
    fn test_primitives() {
        assert_eq!(type_expr_to_ts(&TypeExpr::String), "string");
        assert_eq!(type_expr_to_ts(&TypeExpr::Number), "number");
        assert_eq!(type_expr_to_ts(&TypeExpr::Boolean), "boolean");
        assert_eq!(type_expr_to_ts(&TypeExpr::Unknown), "unknown");
        assert_eq!(type_expr_to_ts(&TypeExpr::Any), "any");
        assert_eq!(type_expr_to_ts(&TypeExpr::Literal("42".into())), "42");
    }

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(
            type_expr_to_ts(&TypeExpr::StringLiteral("it's".into())),
            r"'it\'s'"
        );
    }

    #[test]
    fn test_line_breaks_are_escaped() {
        assert_eq!(
            type_expr_to_ts(&TypeExpr::StringLiteral("two\nlines\r".into())),
            r"'two\nlines\r'"
        );
        assert_eq!(property_key("odd\nkey"), r"'odd\nkey'");
    }

    #[test]
    fn test_array() {
        assert_eq!(
            type_expr_to_ts(&TypeExpr::Array(Box::new(TypeExpr::Ref("Player".into())))),
            "Player[]"
        );
        assert_eq!(
            type_expr_to_ts(&TypeExpr::Array(Box::new(TypeExpr::Union(vec![
                TypeExpr::StringLiteral("a".into()),
                TypeExpr::StringLiteral("b".into()),
            ])))),
            "('a' | 'b')[]"
        );
        assert_eq!(
            type_expr_to_ts(&TypeExpr::Array(Box::new(TypeExpr::Union(vec![
                TypeExpr::StringLiteral("a".into())
            ])))),
            "'a'[]"
        );
    }

    #[test]
    fn test_record() {
        assert_eq!(
            type_expr_to_ts(&TypeExpr::Record(Box::new(TypeExpr::Any))),
            "Record<string, any>"
        );
    }

    #[test]
    fn test_intersection() {
        let ty = TypeExpr::Intersection(vec![
            TypeExpr::Ref("Base".into()),
            TypeExpr::Object(vec![field("x", TypeExpr::Number, true)]),
        ]);
        assert_eq!(type_expr_to_ts(&ty), "Base & {\n  x: number;\n}");
    }

    #[test]
    fn test_union_inside_intersection_is_wrapped() {
        let ty = TypeExpr::Intersection(vec![
            TypeExpr::Union(vec![TypeExpr::Ref("A".into()), TypeExpr::Ref("B".into())]),
            TypeExpr::Ref("C".into()),
        ]);
        assert_eq!(type_expr_to_ts(&ty), "(A | B) & C");
    }

    #[test]
    fn test_array_of_wrapped_compound_items() {
        let intersection = TypeExpr::Array(Box::new(TypeExpr::Union(vec![
            TypeExpr::Intersection(vec![TypeExpr::Ref("A".into()), TypeExpr::Ref("B".into())]),
        ])));
        assert_eq!(type_expr_to_ts(&intersection), "(A & B)[]");

        let union = TypeExpr::Array(Box::new(TypeExpr::Union(vec![TypeExpr::Union(vec![
            TypeExpr::String,
            TypeExpr::Number,
        ])])));
        assert_eq!(type_expr_to_ts(&union), "(string | number)[]");
    }

    #[test]
    fn test_wrapped_union_inside_intersection() {
        let ty = TypeExpr::Intersection(vec![
            TypeExpr::Intersection(vec![TypeExpr::Union(vec![
                TypeExpr::Ref("A".into()),
                TypeExpr::Ref("B".into()),
            ])]),
            TypeExpr::Ref("C".into()),
        ]);
        assert_eq!(type_expr_to_ts(&ty), "(A | B) & C");
    }

    #[test]
    fn test_nested_object_indentation() {
        let ty = TypeExpr::Object(vec![
            field("id", TypeExpr::Number, true),
            field(
                "meta",
                TypeExpr::Object(vec![field("x-tag", TypeExpr::String, false)]),
                false,
            ),
        ]);
        assert_eq!(
            type_expr_to_ts(&ty),
            "{\n  id: number;\n  meta?: {\n    'x-tag'?: string;\n  };\n}"
        );
    }
}
