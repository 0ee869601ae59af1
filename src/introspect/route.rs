//! Route introspection: `RouteDescriptor` → `Operation`.
//!
//! Parses path templates with the `{identifier}` placeholder grammar,
//! validates placeholder/parameter agreement, classifies each route into a
//! CRUD shape and derives its canonical callable name.

use crate::contract::{Operation, OperationKind, ParamSpec, ResponseRef};
use crate::descriptor::{ParamDescriptor, ParamLocation, RouteDescriptor};
use crate::error::{PipelineError, Result};
use crate::generator::naming::callable_name;
use crate::typemap::TypeMapper;
use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap()
});

/// Build `Operation` records for every route.
///
/// Rejected with `RouteValidationError`:
/// - a placeholder without a matching `path` param, or vice versa
/// - more than one `body` param, or a body param without a type
/// - two routes sharing `(method, path)` after normalization
pub fn introspect_routes(routes: &[RouteDescriptor]) -> Result<Vec<Operation>> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut operations = Vec::with_capacity(routes.len());

    for route in routes {
        let op = introspect_route(route)?;
        let key = (op.method.to_string(), normalize_path(&op.path));
        if !seen.insert(key) {
            return Err(PipelineError::RouteValidation {
                route: op.display(),
                reason: "duplicate route: another operation shares this method and path"
                    .to_string(),
            });
        }
        operations.push(op);
    }
    Ok(operations)
}

fn introspect_route(route: &RouteDescriptor) -> Result<Operation> {
    let display = format!("{} {}", route.method.to_uppercase(), route.path);
    let invalid = |reason: String| PipelineError::RouteValidation {
        route: display.clone(),
        reason,
    };

    let method = Method::from_bytes(route.method.to_uppercase().as_bytes())
        .map_err(|_| invalid(format!("unsupported HTTP method `{}`", route.method)))?;

    let placeholders: Vec<String> = PLACEHOLDER_RE
        .captures_iter(&route.path)
        .map(|c| c[1].to_string())
        .collect();
    let mut unique_placeholders = HashSet::new();
    for placeholder in &placeholders {
        if !unique_placeholders.insert(placeholder.as_str()) {
            return Err(invalid(format!(
                "placeholder `{{{placeholder}}}` appears more than once in the template"
            )));
        }
    }

    // Split parameters by location tag.
    let mut declared_path: Vec<&ParamDescriptor> = Vec::new();
    let mut query_params = Vec::new();
    let mut body: Option<&ParamDescriptor> = None;
    for param in &route.params {
        match param.location {
            ParamLocation::Path => declared_path.push(param),
            ParamLocation::Query => query_params.push(ParamSpec {
                name: param.name.clone(),
                contract: param_contract(param, &display)?,
                required: param.required.unwrap_or(false),
            }),
            ParamLocation::Body => {
                if body.is_some() {
                    return Err(invalid("more than one body parameter".to_string()));
                }
                body = Some(param);
            }
        }
    }

    let mut unique_path_names = HashSet::new();
    for param in &declared_path {
        if !unique_path_names.insert(param.name.as_str()) {
            return Err(invalid(format!(
                "path parameter `{}` is declared more than once",
                param.name
            )));
        }
    }

    // Each placeholder needs exactly one path param, and vice versa. Path
    // params come out in path-declaration order regardless of how the route
    // listed them.
    let mut path_params = Vec::with_capacity(placeholders.len());
    for placeholder in &placeholders {
        let param = declared_path
            .iter()
            .find(|p| &p.name == placeholder)
            .ok_or_else(|| {
                invalid(format!(
                    "placeholder `{{{placeholder}}}` has no matching path parameter"
                ))
            })?;
        path_params.push(ParamSpec {
            name: param.name.clone(),
            contract: param_contract(param, &display)?,
            // Path params are always required; a declared `required: false` is ignored.
            required: true,
        });
    }
    if let Some(orphan) = declared_path
        .iter()
        .find(|p| !placeholders.contains(&p.name))
    {
        return Err(invalid(format!(
            "path parameter `{}` has no `{{{}}}` placeholder in the template",
            orphan.name, orphan.name
        )));
    }

    let request_body = match body {
        Some(param) => Some(param.param_type.clone().ok_or_else(|| {
            invalid(format!(
                "body parameter `{}` must name exactly one schema type",
                param.name
            ))
        })?),
        None => None,
    };

    let kind = classify(&method, &route.path);
    let resource = last_static_segment(&route.path).unwrap_or_else(|| "resource".to_string());
    let tag = first_static_segment(&route.path).unwrap_or_else(|| resource.clone());
    let verb = verb_for(kind, &method);
    let name = callable_name(&verb, &resource, kind == OperationKind::List);

    Ok(Operation {
        method,
        path: route.path.clone(),
        name,
        kind,
        tag,
        path_params,
        query_params,
        request_body,
        response: route.response.clone().map(|schema| ResponseRef {
            schema,
            many: route.response_many,
        }),
        requires_auth: route.auth,
    })
}

fn param_contract(
    param: &ParamDescriptor,
    route: &str,
) -> Result<crate::typemap::ContractType> {
    let tag = param.param_type.as_deref().unwrap_or("string");
    TypeMapper::contract_for_source(tag).ok_or_else(|| PipelineError::Mapping {
        entity: route.to_string(),
        field: param.name.clone(),
        source_type: tag.to_string(),
    })
}

/// Trailing-slash-insensitive normalization for duplicate detection.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn classify(method: &Method, path: &str) -> OperationKind {
    let item = normalize_path(path)
        .rsplit('/')
        .next()
        .map(|seg| seg.starts_with('{'))
        .unwrap_or(false);
    match (method, item) {
        (&Method::GET, true) => OperationKind::Get,
        (&Method::GET, false) => OperationKind::List,
        (&Method::POST, false) => OperationKind::Create,
        (&Method::PUT, true) | (&Method::PATCH, true) => OperationKind::Update,
        (&Method::DELETE, true) => OperationKind::Delete,
        _ => OperationKind::Custom,
    }
}

fn verb_for(kind: OperationKind, method: &Method) -> String {
    match kind {
        OperationKind::List => "list".to_string(),
        OperationKind::Get => "get".to_string(),
        OperationKind::Create => "create".to_string(),
        OperationKind::Update => "update".to_string(),
        OperationKind::Delete => "delete".to_string(),
        OperationKind::Custom => method.as_str().to_ascii_lowercase(),
    }
}

fn first_static_segment(path: &str) -> Option<String> {
    path.split('/')
        .find(|seg| !seg.is_empty() && !seg.starts_with('{'))
        .map(|s| s.to_string())
}

fn last_static_segment(path: &str) -> Option<String> {
    path.split('/')
        .filter(|seg| !seg.is_empty() && !seg.starts_with('{'))
        .next_back()
        .map(|s| s.to_string())
}
