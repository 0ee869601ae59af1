//! Contract synthesis: merge introspection outputs into one immutable
//! `Contract`, resolving references and detecting collisions.

use super::types::{Contract, Operation, SchemaType, SecurityScheme};
use crate::error::{PipelineError, Result};
use std::collections::{BTreeMap, HashMap};

/// Merge schemas and operations into a canonical `Contract`.
///
/// Hard failures (no best-effort renaming, nothing dropped silently):
/// - two schemas whose names match case-insensitively (`CollisionError`)
/// - two operations deriving the same callable name (`CollisionError`)
/// - an operation referencing a schema absent from the set (`ReferenceError`)
pub fn synthesize(
    title: &str,
    version: &str,
    schemas: Vec<SchemaType>,
    mut operations: Vec<Operation>,
) -> Result<Contract> {
    let mut by_name: BTreeMap<String, SchemaType> = BTreeMap::new();
    let mut seen_ci: HashMap<String, String> = HashMap::new();
    for schema in schemas {
        let key = schema.name.to_ascii_lowercase();
        if let Some(first) = seen_ci.get(&key) {
            return Err(PipelineError::Collision {
                name: schema.name.clone(),
                first: first.clone(),
                second: format!("{}::{}", schema.source_module, schema.name),
            });
        }
        seen_ci.insert(key, format!("{}::{}", schema.source_module, schema.name));
        by_name.insert(schema.name.clone(), schema);
    }

    // Referential integrity: every body/response schema must resolve.
    for op in &operations {
        if let Some(body) = &op.request_body {
            if !by_name.contains_key(body) {
                return Err(PipelineError::Reference {
                    operation: op.display(),
                    schema: body.clone(),
                });
            }
        }
        if let Some(response) = &op.response {
            if !by_name.contains_key(&response.schema) {
                return Err(PipelineError::Reference {
                    operation: op.display(),
                    schema: response.schema.clone(),
                });
            }
        }
    }

    // Two operations landing on the same callable would overwrite each other
    // in every generated target.
    let mut names: HashMap<&str, String> = HashMap::new();
    for op in &operations {
        if let Some(first) = names.insert(op.name.as_str(), op.display()) {
            return Err(PipelineError::Collision {
                name: op.name.clone(),
                first,
                second: op.display(),
            });
        }
    }

    // Canonical order: (path, METHOD), case-sensitive byte comparison.
    operations.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then_with(|| a.method.as_str().cmp(b.method.as_str()))
    });

    let mut security_schemes = BTreeMap::new();
    if operations.iter().any(|op| op.requires_auth) {
        security_schemes.insert("bearerAuth".to_string(), SecurityScheme::bearer());
    }

    tracing::debug!(
        schemas = by_name.len(),
        operations = operations.len(),
        "synthesized contract"
    );

    Ok(Contract {
        title: title.to_string(),
        version: version.to_string(),
        schemas: by_name,
        operations,
        security_schemes,
    })
}
