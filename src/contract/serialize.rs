//! Canonical OpenAPI-shaped serialization of a `Contract`.
//!
//! `serde_json`'s default map is ordered, so building the document out of
//! plain `json!` values already yields sorted keys everywhere; together with
//! the contract's canonical operation order this makes the output
//! byte-for-byte reproducible for unchanged input.

use super::types::{Contract, FieldSpec, Operation, ResponseRef};
use serde_json::{json, Map, Value};

/// Render the full OpenAPI-shaped document.
pub fn contract_document(contract: &Contract) -> Value {
    let mut paths: Map<String, Value> = Map::new();
    for op in &contract.operations {
        let entry = paths
            .entry(op.path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(item) = entry {
            item.insert(
                op.method.as_str().to_ascii_lowercase(),
                operation_object(op),
            );
        }
    }

    let mut schemas: Map<String, Value> = Map::new();
    for (name, schema) in &contract.schemas {
        let mut properties: Map<String, Value> = Map::new();
        for field in &schema.fields {
            properties.insert(field.name.clone(), property_object(field));
        }
        let mut object = Map::new();
        object.insert("type".to_string(), json!("object"));
        object.insert("properties".to_string(), Value::Object(properties));
        if !schema.required.is_empty() {
            object.insert(
                "required".to_string(),
                json!(schema.required.iter().collect::<Vec<_>>()),
            );
        }
        schemas.insert(name.clone(), Value::Object(object));
    }

    let mut security_schemes: Map<String, Value> = Map::new();
    for (name, scheme) in &contract.security_schemes {
        security_schemes.insert(
            name.clone(),
            json!({ "type": scheme.scheme_type, "scheme": scheme.scheme }),
        );
    }

    json!({
        "openapi": "3.0.3",
        "info": { "title": contract.title, "version": contract.version },
        "paths": paths,
        "components": {
            "schemas": schemas,
            "securitySchemes": security_schemes,
        },
    })
}

/// Pretty-printed `contract.json` body with a trailing newline.
pub fn contract_json(contract: &Contract) -> String {
    let doc = contract_document(contract);
    let mut out = serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string());
    out.push('\n');
    out
}

fn operation_object(op: &Operation) -> Value {
    let mut object = Map::new();
    object.insert(
        "operationId".to_string(),
        json!(crate::generator::naming::camel_case(&op.name)),
    );
    object.insert("tags".to_string(), json!([op.tag]));

    let mut parameters = Vec::new();
    for p in &op.path_params {
        parameters.push(json!({
            "name": p.name,
            "in": "path",
            "required": true,
            "schema": scalar_schema(p.contract),
        }));
    }
    for p in &op.query_params {
        parameters.push(json!({
            "name": p.name,
            "in": "query",
            "required": p.required,
            "schema": scalar_schema(p.contract),
        }));
    }
    if !parameters.is_empty() {
        object.insert("parameters".to_string(), Value::Array(parameters));
    }

    if let Some(body) = &op.request_body {
        object.insert(
            "requestBody".to_string(),
            json!({
                "required": true,
                "content": {
                    "application/json": { "schema": schema_ref(body, false) }
                }
            }),
        );
    }

    object.insert("responses".to_string(), responses_object(op.response.as_ref()));

    if op.requires_auth {
        object.insert("security".to_string(), json!([{ "bearerAuth": [] }]));
    }

    Value::Object(object)
}

fn responses_object(response: Option<&ResponseRef>) -> Value {
    match response {
        Some(r) => json!({
            "200": {
                "description": "OK",
                "content": {
                    "application/json": { "schema": schema_ref(&r.schema, r.many) }
                }
            }
        }),
        None => json!({ "204": { "description": "No Content" } }),
    }
}

fn schema_ref(name: &str, many: bool) -> Value {
    let reference = json!({ "$ref": format!("#/components/schemas/{name}") });
    if many {
        json!({ "type": "array", "items": reference })
    } else {
        reference
    }
}

fn scalar_schema(contract: crate::typemap::ContractType) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), json!(contract.ty));
    if let Some(format) = contract.format {
        object.insert("format".to_string(), json!(format));
    }
    Value::Object(object)
}

fn property_object(field: &FieldSpec) -> Value {
    let mut object = match scalar_schema(field.contract) {
        Value::Object(o) => o,
        _ => Map::new(),
    };
    if field.nullable {
        object.insert("nullable".to_string(), json!(true));
    }
    if let Some(max) = field.constraints.max_length {
        object.insert("maxLength".to_string(), json!(max));
    }
    if !field.constraints.enum_values.is_empty() {
        object.insert("enum".to_string(), json!(field.constraints.enum_values));
    }
    if let Some(precision) = field.constraints.precision {
        object.insert("x-precision".to_string(), json!(precision));
    }
    if let Some(default) = &field.constraints.default {
        object.insert("default".to_string(), default.clone());
    }
    Value::Object(object)
}
