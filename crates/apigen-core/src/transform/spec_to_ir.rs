use std::collections::HashMap;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::ir::*;
use crate::parse::operation::Operation;
use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::ref_resolve::{ParameterResolver, follow_schema_ref};
use crate::parse::schema::{Schema, SchemaType, ref_name};
use crate::parse::spec::{Definitions, Document};

use super::name_normalizer::{sanitize_param_name, to_function_name, to_type_name};
use super::schema_resolver::{definition_to_ir_schema, resolve, resolve_schema};
use super::usage::{UsedTypes, extract_from_schema};

static PATH_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// Name of the request body parameter in every generated signature.
pub const BODY_PARAM_NAME: &str = "data";

/// Transform a parsed document into the fully resolved IR.
///
/// `source` is where the document came from (URL or file path). The
/// transform never fails: missing or malformed pieces degrade to permissive
/// types.
pub fn transform(doc: &Document, source: &str) -> IrSpec {
    let definitions = doc.definitions();

    // Phase 1: one declaration per named schema
    let schemas = definitions
        .iter()
        .map(|(name, schema)| definition_to_ir_schema(name, schema, &definitions))
        .collect();

    // Phase 2: one function per supported (path, method)
    let mut ctx = OperationContext {
        definitions: &definitions,
        resolver: ParameterResolver::new(doc),
        taken_names: HashMap::new(),
        used_types: UsedTypes::new(),
    };
    let mut operations = Vec::new();
    for (path, item) in &doc.paths {
        let shared = ctx.resolver.resolve_all(&item.parameters);
        for (method, op) in item.operations() {
            operations.push(ctx.build_operation(method, path, &op, &shared));
        }
    }
    debug!(
        "resolved {} schemas, {} operations",
        definitions.len(),
        operations.len()
    );

    let used_types = ctx.used_types;
    IrSpec {
        info: IrInfo {
            title: doc.info.title.clone(),
            description: doc.info.description.clone(),
            version: doc.info.version.clone(),
        },
        source: source.to_string(),
        schemas,
        operations,
        used_types,
        definitions,
    }
}

struct OperationContext<'a> {
    definitions: &'a Definitions,
    resolver: ParameterResolver<'a>,
    /// Function names handed out so far, with how many times each was asked for.
    taken_names: HashMap<String, usize>,
    used_types: UsedTypes,
}

impl OperationContext<'_> {
    fn build_operation(
        &mut self,
        method: HttpMethod,
        path: &str,
        op: &Operation,
        shared: &[Parameter],
    ) -> IrOperation {
        let raw_name = op
            .operation_id
            .clone()
            .unwrap_or_else(|| format!("{}_{}", method.as_lower(), path));
        let name = self.claim_function_name(to_function_name(&raw_name));
        debug!("{} {} -> {}", method.as_str(), path, name);

        let declared = merge_parameters(shared, self.resolver.resolve_all(&op.parameters));
        let mut names = ParamNames::default();

        let mut parameters: Vec<IrParameter> = declared
            .iter()
            .filter(|p| p.location == ParameterLocation::Path)
            .map(|p| self.build_parameter(p, IrParameterLocation::Path, &mut names))
            .collect();
        for token in path_tokens(path) {
            if !parameters.iter().any(|p| p.original_name == token) {
                warn!("{name}: path token `{{{token}}}` is not declared, typing it as string");
                parameters.push(IrParameter {
                    name: names.claim(sanitize_param_name(token)),
                    original_name: token.to_string(),
                    location: IrParameterLocation::Path,
                    param_type: TypeExpr::String,
                    required: true,
                    is_array: false,
                    description: None,
                });
            }
        }
        parameters.extend(
            declared
                .iter()
                .filter(|p| p.location == ParameterLocation::Query)
                .map(|p| self.build_parameter(p, IrParameterLocation::Query, &mut names)),
        );

        let request_body = self.build_request_body(op, &declared, &mut names);

        let response_schema = op.success_response().and_then(|r| r.json_schema());
        let return_type = match response_schema {
            Some(schema) => {
                self.record_schema(schema);
                resolve_schema(schema, self.definitions)
            }
            None => TypeExpr::Any,
        };

        IrOperation {
            name,
            method,
            path: path.to_string(),
            summary: op.summary.clone(),
            description: op.description.clone(),
            deprecated: op.deprecated.unwrap_or(false),
            parameters,
            request_body,
            return_type,
        }
    }

    fn build_parameter(
        &mut self,
        param: &Parameter,
        location: IrParameterLocation,
        names: &mut ParamNames,
    ) -> IrParameter {
        let schema = param.effective_schema();
        self.record_schema(&schema);
        IrParameter {
            name: names.claim(sanitize_param_name(&param.name)),
            original_name: param.name.clone(),
            location,
            param_type: resolve_schema(&schema, self.definitions),
            // Path parameters are always required.
            required: param.required || location == IrParameterLocation::Path,
            is_array: param.name.contains("[]") || is_array_schema(&schema, self.definitions),
            description: param.description.clone(),
        }
    }

    fn build_request_body(
        &mut self,
        op: &Operation,
        declared: &[Parameter],
        names: &mut ParamNames,
    ) -> Option<IrRequestBody> {
        let (schema, description) = match op.request_body {
            Some(ref body) => (body.json_schema()?, body.description.clone()),
            None => {
                let legacy = declared
                    .iter()
                    .find(|p| p.location == ParameterLocation::Body)?;
                (legacy.schema.as_ref()?, legacy.description.clone())
            }
        };

        if let Some(ref ref_path) = schema.reference {
            // Recorded even when the target is missing; assembly reports it.
            self.used_types.insert(to_type_name(ref_name(ref_path)));
        }
        self.record_schema(schema);

        Some(IrRequestBody {
            param_name: names.claim(BODY_PARAM_NAME.to_string()),
            body_type: resolve(Some(schema), self.definitions),
            description,
        })
    }

    fn record_schema(&mut self, schema: &Schema) {
        self.used_types
            .merge(extract_from_schema(schema, self.definitions));
    }

    fn claim_function_name(&mut self, name: String) -> String {
        let count = self.taken_names.entry(name.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            return name;
        }
        let mut n = *count;
        loop {
            let candidate = format!("{name}{n}");
            if !self.taken_names.contains_key(&candidate) {
                warn!("function name `{name}` is already taken, using `{candidate}`");
                self.taken_names.insert(candidate.clone(), 1);
                return candidate;
            }
            n += 1;
        }
    }
}

/// Identifiers already used in one signature.
#[derive(Default)]
struct ParamNames(Vec<String>);

impl ParamNames {
    fn claim(&mut self, name: String) -> String {
        let mut candidate = name.clone();
        let mut n = 2;
        while self.0.contains(&candidate) {
            candidate = format!("{name}{n}");
            n += 1;
        }
        self.0.push(candidate.clone());
        candidate
    }
}

/// Path-item parameters followed by the operation's own; an operation
/// parameter replaces a path-item one with the same name and location.
fn merge_parameters(shared: &[Parameter], own: Vec<Parameter>) -> Vec<Parameter> {
    let mut merged: Vec<Parameter> = shared
        .iter()
        .filter(|s| {
            !own
                .iter()
                .any(|o| o.name == s.name && o.location == s.location)
        })
        .cloned()
        .collect();
    merged.extend(own);
    merged
}

/// Names of the `{token}`s in a URL template, in order, without repeats.
pub fn path_tokens(path: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = Vec::new();
    for caps in PATH_TOKEN_RE.captures_iter(path) {
        if let Some(m) = caps.get(1)
            && !tokens.contains(&m.as_str())
        {
            tokens.push(m.as_str());
        }
    }
    tokens
}

fn is_array_schema(schema: &Schema, definitions: &Definitions) -> bool {
    follow_schema_ref(schema, definitions)
        .is_some_and(|target| target.primary_type() == Some(SchemaType::Array))
}
