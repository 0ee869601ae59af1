#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::contract::OperationKind;
use crate::descriptor::{
    EntityDescriptor, FieldDescriptor, ParamDescriptor, ParamLocation, RouteDescriptor,
};

fn field(name: &str, ty: &str) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        source_type: ty.to_string(),
        nullable: false,
        default: None,
        max_length: None,
        enum_values: vec![],
        precision: None,
    }
}

fn entity(name: &str, fields: Vec<FieldDescriptor>) -> EntityDescriptor {
    EntityDescriptor {
        name: name.to_string(),
        module: format!("app.models.{}", name.to_lowercase()),
        fields,
    }
}

fn param(name: &str, location: ParamLocation, ty: Option<&str>) -> ParamDescriptor {
    ParamDescriptor {
        name: name.to_string(),
        location,
        param_type: ty.map(String::from),
        required: None,
    }
}

fn route(method: &str, path: &str, params: Vec<ParamDescriptor>) -> RouteDescriptor {
    RouteDescriptor {
        method: method.to_string(),
        path: path.to_string(),
        auth: false,
        params,
        response: Some("Product".to_string()),
        response_many: false,
    }
}

#[test]
fn required_iff_non_nullable_without_default() {
    let mut price = field("price", "decimal");
    price.nullable = true;
    let mut status = field("status", "string");
    status.default = Some(serde_json::json!("draft"));

    let schemas =
        introspect_entities(&[entity("Product", vec![field("id", "integer"), price, status])])
            .unwrap();
    let product = &schemas[0];
    assert!(product.required.contains("id"));
    assert!(!product.required.contains("price"));
    assert!(!product.required.contains("status"));
    // Invariant: non-nullable without default implies membership in required.
    for f in &product.fields {
        if !f.nullable && f.constraints.default.is_none() {
            assert!(product.required.contains(&f.name));
        }
    }
}

#[test]
fn enum_values_are_copied_verbatim() {
    let mut state = field("state", "enum");
    state.enum_values = vec!["open".into(), "closed".into()];
    let schemas = introspect_entities(&[entity("WorkOrder", vec![state])]).unwrap();
    assert_eq!(
        schemas[0].fields[0].constraints.enum_values,
        vec!["open", "closed"]
    );
}

#[test]
fn enum_without_values_is_a_mapping_error() {
    let err = introspect_entities(&[entity("WorkOrder", vec![field("state", "enum")])])
        .unwrap_err();
    assert_eq!(err.kind(), "MappingError");
}

#[test]
fn unmapped_type_names_entity_field_and_type() {
    let err = introspect_entities(&[entity("Product", vec![field("price", "money")])])
        .unwrap_err();
    assert_eq!(err.kind(), "MappingError");
    let msg = err.to_string();
    assert!(msg.contains("Product.price"), "{msg}");
    assert!(msg.contains("money"), "{msg}");
}

#[test]
fn routes_classify_and_name() {
    let ops = introspect_routes(&[
        route("GET", "/products", vec![]),
        route(
            "GET",
            "/products/{id}",
            vec![param("id", ParamLocation::Path, Some("integer"))],
        ),
        route("POST", "/products", vec![]),
        route(
            "DELETE",
            "/work-orders/{id}",
            vec![param("id", ParamLocation::Path, Some("integer"))],
        ),
    ])
    .unwrap();
    assert_eq!(ops[0].kind, OperationKind::List);
    assert_eq!(ops[0].name, "list_products");
    assert_eq!(ops[1].kind, OperationKind::Get);
    assert_eq!(ops[1].name, "get_product");
    assert_eq!(ops[2].kind, OperationKind::Create);
    assert_eq!(ops[2].name, "create_product");
    assert_eq!(ops[3].name, "delete_work_order");
    assert_eq!(ops[3].tag, "work-orders");
}

#[test]
fn placeholder_without_param_is_rejected() {
    let err = introspect_routes(&[route("GET", "/products/{id}", vec![])]).unwrap_err();
    assert_eq!(err.kind(), "RouteValidationError");
    assert!(err.to_string().contains("{id}"));
}

#[test]
fn orphan_path_param_is_rejected() {
    let err = introspect_routes(&[route(
        "GET",
        "/products",
        vec![param("id", ParamLocation::Path, Some("integer"))],
    )])
    .unwrap_err();
    assert_eq!(err.kind(), "RouteValidationError");
}

#[test]
fn repeated_placeholder_names_are_rejected() {
    // One declared param would satisfy both occurrences and the callable
    // would take the same argument twice.
    let err = introspect_routes(&[route(
        "GET",
        "/a/{id}/b/{id}",
        vec![param("id", ParamLocation::Path, Some("integer"))],
    )])
    .unwrap_err();
    assert_eq!(err.kind(), "RouteValidationError");
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn repeated_path_param_declarations_are_rejected() {
    let err = introspect_routes(&[route(
        "GET",
        "/a/{id}",
        vec![
            param("id", ParamLocation::Path, Some("integer")),
            param("id", ParamLocation::Path, Some("integer")),
        ],
    )])
    .unwrap_err();
    assert_eq!(err.kind(), "RouteValidationError");
    assert!(err.to_string().contains("declared more than once"));
}

#[test]
fn two_body_params_are_rejected() {
    let err = introspect_routes(&[route(
        "POST",
        "/items",
        vec![
            param("a", ParamLocation::Body, Some("Item")),
            param("b", ParamLocation::Body, Some("Item")),
        ],
    )])
    .unwrap_err();
    assert_eq!(err.kind(), "RouteValidationError");
    assert!(err.to_string().contains("body"));
}

#[test]
fn duplicate_routes_are_trailing_slash_insensitive() {
    let err = introspect_routes(&[
        route("GET", "/products", vec![]),
        route("get", "/products/", vec![]),
    ])
    .unwrap_err();
    assert_eq!(err.kind(), "RouteValidationError");
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn path_params_follow_declaration_order() {
    let ops = introspect_routes(&[route(
        "GET",
        "/orders/{order_id}/lines/{line_id}",
        vec![
            // Listed out of order on purpose.
            param("line_id", ParamLocation::Path, Some("integer")),
            param("order_id", ParamLocation::Path, Some("integer")),
        ],
    )])
    .unwrap();
    let names: Vec<_> = ops[0].path_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["order_id", "line_id"]);
}
