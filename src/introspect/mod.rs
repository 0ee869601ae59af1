//! # Introspection Module
//!
//! Turns backend descriptors into canonical contract records:
//!
//! - [`introspect_entities`] maps `EntityDescriptor` field declarations
//!   through the type table into [`crate::contract::SchemaType`] records.
//! - [`introspect_routes`] validates `RouteDescriptor` path templates and
//!   parameter lists and produces [`crate::contract::Operation`] records.
//!
//! Both run before synthesis; any validation failure aborts the run with a
//! taxonomy error and nothing is ever written.

mod route;
mod schema;

#[cfg(test)]
mod tests;

pub use route::introspect_routes;
pub use schema::introspect_entities;
