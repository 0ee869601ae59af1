//! # Generator Module
//!
//! Renders frontend code from an immutable [`crate::contract::Contract`].
//! Each generator is a pure function: contract in, [`GeneratedFile`] values
//! out. Nothing here touches the filesystem; the pipeline owns the write
//! phase so that a failing run never leaves partial output behind.
//!
//! Outputs per run:
//!
//! - `types.ts`: one interface per schema
//! - `client.ts`: an `ApiClient` with one callable per operation
//! - `store.<entity>.ts`: Pinia-style state containers
//! - `<Entity>List/Detail/Form.vue`: scaffolds bound to stores
//!
//! Emission goes through the typed [`CodeWriter`] builder rather than
//! string templates, so block structure and indentation are enforced by
//! construction.

mod client;
mod component;
mod emit;
pub mod naming;
mod store;
mod types;


pub use client::generate_client;
pub use component::generate_components;
pub use emit::{CodeWriter, GeneratedFile};
pub use naming::NamingConvention;
pub use store::generate_stores;
pub use types::generate_types;
