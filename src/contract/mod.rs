//! # Contract Module
//!
//! The contract is the intermediate representation at the center of the
//! pipeline: introspection feeds it, every generator reads it, and
//! `contract.json` is its canonical serialization.
//!
//! - [`types`] holds the IR records (`SchemaType`, `Operation`, `Contract`).
//! - [`synthesize`] merges introspection output, resolves references and
//!   rejects collisions.
//! - [`serialize`] renders the OpenAPI-shaped document deterministically.

mod serialize;
mod synthesize;
mod types;

#[cfg(test)]
mod tests;

pub use serialize::{contract_document, contract_json};
pub use synthesize::synthesize;
pub use types::{
    Constraints, Contract, FieldSpec, Operation, OperationKind, ParamSpec, ResponseRef,
    SchemaType, SecurityScheme,
};
