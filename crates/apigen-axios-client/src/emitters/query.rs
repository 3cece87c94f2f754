use apigen_core::ir::IrParameter;

/// Build the `${...}` interpolation appended to the URL template for an
/// operation's query parameters.
///
/// - no parameters: nothing;
/// - a single optional scalar: one conditional `?key=value`;
/// - anything else: a fragment list filtered at call time and joined with
///   `&`, prefixed with `?` only when a fragment survives.
pub fn query_suffix(params: &[&IrParameter]) -> String {
    match params {
        [] => String::new(),
        [single] if !single.required && !single.is_array => format!(
            "${{{} ? '?{}=' + {} : ''}}",
            presence_check(single),
            js_string_body(&single.original_name),
            encoded_value(single)
        ),
        _ => {
            let fragments: Vec<String> = params.iter().map(|p| fragment(p)).collect();
            format!(
                "${{(() => {{ const parts = [{}].filter(Boolean); return parts.length > 0 ? '?' + parts.join('&') : ''; }})()}}",
                fragments.join(", ")
            )
        }
    }
}

/// One `key=value` fragment. Optional parameters evaluate to `null` when
/// absent so the filter drops them.
fn fragment(param: &IrParameter) -> String {
    let pair = format!(
        "'{}=' + {}",
        js_string_body(&param.original_name),
        encoded_value(param)
    );
    if param.required {
        pair
    } else {
        format!("{} ? {pair} : null", presence_check(param))
    }
}

fn encoded_value(param: &IrParameter) -> String {
    if param.is_array {
        format!(
            "{}.map((v) => encodeURIComponent(String(v))).join('&{}=')",
            param.name,
            js_string_body(&param.original_name)
        )
    } else {
        format!("encodeURIComponent(String({}))", param.name)
    }
}

fn presence_check(param: &IrParameter) -> String {
    let name = &param.name;
    if param.is_array {
        format!("{name} != null && {name}.length > 0")
    } else {
        format!("{name} != null && String({name}) !== ''")
    }
}

/// Escape text for use between single quotes.
fn js_string_body(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use apigen_core::ir::{IrParameterLocation, TypeExpr};

    use super::*;

    fn param(name: &str, required: bool, is_array: bool) -> IrParameter {
        IrParameter {
            name: name.replace("[]", ""),
            original_name: name.to_string(),
            location: IrParameterLocation::Query,
            param_type: if is_array {
                TypeExpr::Array(Box::new(TypeExpr::String))
            } else {
                TypeExpr::String
            },
            required,
            is_array,
            description: None,
        }
    }

    #[test]
    fn test_no_query_params() {
        assert_eq!(query_suffix(&[]), "");
    }

    #[test]
    fn test_single_optional_param() {
        let page = param("page", false, false);
        assert_eq!(
            query_suffix(&[&page]),
            "${page != null && String(page) !== '' ? '?page=' + encodeURIComponent(String(page)) : ''}"
        );
    }

    #[test]
    fn test_single_required_param_uses_fragments() {
        let q = param("q", true, false);
        assert_eq!(
            query_suffix(&[&q]),
            "${(() => { const parts = ['q=' + encodeURIComponent(String(q))].filter(Boolean); return parts.length > 0 ? '?' + parts.join('&') : ''; })()}"
        );
    }

    #[test]
    fn test_mixed_params() {
        let q = param("q", true, false);
        let limit = param("limit", false, false);
        let tags = param("tags[]", false, true);
        let out = query_suffix(&[&q, &limit, &tags]);
        assert!(out.contains("'q=' + encodeURIComponent(String(q))"));
        assert!(out.contains(
            "limit != null && String(limit) !== '' ? 'limit=' + encodeURIComponent(String(limit)) : null"
        ));
        assert!(out.contains(
            "tags != null && tags.length > 0 ? 'tags[]=' + tags.map((v) => encodeURIComponent(String(v))).join('&tags[]=') : null"
        ));
    }

    #[test]
    fn test_single_optional_array_uses_fragments() {
        let ids = param("ids", false, true);
        let out = query_suffix(&[&ids]);
        assert!(out.starts_with("${(() => { const parts = [ids != null && ids.length > 0"));
        assert!(out.contains(".join('&ids=')"));
    }

    #[test]
    fn test_keys_are_escaped() {
        let odd = param("it's", true, false);
        assert!(query_suffix(&[&odd]).contains(r"'it\'s=' + "));
    }
}
