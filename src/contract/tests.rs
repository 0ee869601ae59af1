#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::introspect::{introspect_entities, introspect_routes};
use crate::descriptor::{
    EntityDescriptor, FieldDescriptor, ParamDescriptor, ParamLocation, RouteDescriptor,
};

fn product_entity(module: &str, name: &str) -> EntityDescriptor {
    EntityDescriptor {
        name: name.to_string(),
        module: module.to_string(),
        fields: vec![FieldDescriptor {
            name: "id".to_string(),
            source_type: "integer".to_string(),
            nullable: false,
            default: None,
            max_length: None,
            enum_values: vec![],
            precision: None,
        }],
    }
}

fn get_route(path: &str, response: &str) -> RouteDescriptor {
    let params = if path.contains("{id}") {
        vec![ParamDescriptor {
            name: "id".to_string(),
            location: ParamLocation::Path,
            param_type: Some("integer".to_string()),
            required: None,
        }]
    } else {
        vec![]
    };
    RouteDescriptor {
        method: "GET".to_string(),
        path: path.to_string(),
        auth: false,
        params,
        response: Some(response.to_string()),
        response_many: !path.contains('{'),
    }
}

fn build(
    entities: Vec<EntityDescriptor>,
    routes: Vec<RouteDescriptor>,
) -> crate::error::Result<Contract> {
    let schemas = introspect_entities(&entities)?;
    let ops = introspect_routes(&routes)?;
    synthesize("test", "0.1.0", schemas, ops)
}

#[test]
fn case_insensitive_schema_collision_names_both_sources() {
    let err = build(
        vec![
            product_entity("app.sales", "Order"),
            product_entity("app.mfg", "order"),
        ],
        vec![],
    )
    .unwrap_err();
    assert_eq!(err.kind(), "CollisionError");
    let msg = err.to_string();
    assert!(msg.contains("app.sales"), "{msg}");
    assert!(msg.contains("app.mfg"), "{msg}");
}

#[test]
fn unknown_response_schema_is_a_reference_error() {
    let err = build(
        vec![product_entity("app", "Product")],
        vec![get_route("/widgets", "Widget")],
    )
    .unwrap_err();
    assert_eq!(err.kind(), "ReferenceError");
    assert!(err.to_string().contains("Widget"));
}

#[test]
fn unknown_body_schema_is_a_reference_error() {
    let route = RouteDescriptor {
        method: "POST".to_string(),
        path: "/products".to_string(),
        auth: false,
        params: vec![ParamDescriptor {
            name: "payload".to_string(),
            location: ParamLocation::Body,
            param_type: Some("Ghost".to_string()),
            required: None,
        }],
        response: Some("Product".to_string()),
        response_many: false,
    };
    let err = build(vec![product_entity("app", "Product")], vec![route]).unwrap_err();
    assert_eq!(err.kind(), "ReferenceError");
}

#[test]
fn operations_sort_by_path_then_method() {
    let mut post = get_route("/products", "Product");
    post.method = "POST".to_string();
    post.response_many = false;
    let contract = build(
        vec![product_entity("app", "Product")],
        vec![
            get_route("/products/{id}", "Product"),
            post,
            get_route("/products", "Product"),
        ],
    )
    .unwrap();
    let order: Vec<_> = contract
        .operations
        .iter()
        .map(|op| format!("{} {}", op.method, op.path))
        .collect();
    assert_eq!(
        order,
        vec!["GET /products", "POST /products", "GET /products/{id}"]
    );
}

#[test]
fn serialization_is_deterministic() {
    let make = || {
        build(
            vec![
                product_entity("app", "Product"),
                product_entity("app", "Order"),
            ],
            vec![
                get_route("/products", "Product"),
                get_route("/orders", "Order"),
            ],
        )
        .unwrap()
    };
    let a = contract_json(&make());
    let b = contract_json(&make());
    assert_eq!(a, b);
}

#[test]
fn serialization_is_input_order_independent() {
    let forward = build(
        vec![
            product_entity("app", "Product"),
            product_entity("app", "Order"),
        ],
        vec![
            get_route("/products", "Product"),
            get_route("/orders", "Order"),
        ],
    )
    .unwrap();
    let reversed = build(
        vec![
            product_entity("app", "Order"),
            product_entity("app", "Product"),
        ],
        vec![
            get_route("/orders", "Order"),
            get_route("/products", "Product"),
        ],
    )
    .unwrap();
    assert_eq!(contract_json(&forward), contract_json(&reversed));
}

#[test]
fn document_shape_is_openapi_like() {
    let mut auth_route = get_route("/products/{id}", "Product");
    auth_route.auth = true;
    let contract = build(vec![product_entity("app", "Product")], vec![auth_route]).unwrap();
    let doc = contract_document(&contract);
    assert_eq!(doc["openapi"], "3.0.3");
    let op = &doc["paths"]["/products/{id}"]["get"];
    assert_eq!(op["operationId"], "getProduct");
    assert_eq!(op["parameters"][0]["in"], "path");
    assert_eq!(
        op["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/Product"
    );
    assert_eq!(op["security"][0]["bearerAuth"], serde_json::json!([]));
    assert_eq!(
        doc["components"]["securitySchemes"]["bearerAuth"]["scheme"],
        "bearer"
    );
    assert_eq!(
        doc["components"]["schemas"]["Product"]["required"][0],
        "id"
    );
}

#[test]
fn delete_without_response_serializes_as_204() {
    let route = RouteDescriptor {
        method: "DELETE".to_string(),
        path: "/products/{id}".to_string(),
        auth: false,
        params: vec![ParamDescriptor {
            name: "id".to_string(),
            location: ParamLocation::Path,
            param_type: Some("integer".to_string()),
            required: None,
        }],
        response: None,
        response_many: false,
    };
    let contract = build(vec![product_entity("app", "Product")], vec![route]).unwrap();
    let doc = contract_document(&contract);
    assert!(doc["paths"]["/products/{id}"]["delete"]["responses"]["204"].is_object());
}
