//! # frontsync
//!
//! **frontsync** is a contract-first code generator that keeps a typed
//! frontend in lockstep with a backend API: it reads a plain-data descriptor
//! exported by the backend, synthesizes a canonical OpenAPI-shaped contract,
//! and emits a typed API client, reactive state stores and UI scaffolds.
//!
//! ## Overview
//!
//! The backend exports one file describing its entities and routes. Everything
//! downstream is derived from that file in a single strict pipeline; any
//! invalid declaration aborts the run before a single output file is written,
//! so stale output is never mixed with fresh output.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`descriptor`]** - Deserialization of the backend's entity/route export
//! - **[`typemap`]** - Static source-type to contract-type mapping table
//! - **[`introspect`]** - Descriptor validation and contract record construction
//! - **[`contract`]** - The intermediate representation and its canonical
//!   `contract.json` serialization
//! - **[`generator`]** - Client, store and component emission through a typed
//!   code builder
//! - **[`pipeline`]** - Stage orchestration, parallel generation and the
//!   atomic write phase
//! - **[`cli`]** - The `frontsync` binary's `generate` and `check` commands
//! - **[`error`]** - The fatal error taxonomy shared by every stage
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(frontsync)
//!     participant Desc as descriptor::load_model
//!     participant Intro as introspect
//!     participant Contract as contract::synthesize
//!     participant Gen as generator
//!     participant FS as File System
//!
//!     User->>CLI: frontsync generate<br/>--input model.yaml --out src/api
//!     CLI->>Desc: load_model("model.yaml")
//!     Desc-->>CLI: SourceModel
//!     CLI->>Intro: introspect_entities / introspect_routes
//!     Intro->>Intro: Map types, validate paths,<br/>derive callable names
//!     Intro-->>CLI: Vec<SchemaType>, Vec<Operation>
//!     CLI->>Contract: synthesize(...)
//!     Contract->>Contract: Resolve references,<br/>reject collisions, sort
//!     Contract-->>CLI: Contract
//!     CLI->>Gen: types + client / stores / components<br/>(scoped threads)
//!     Gen-->>CLI: Vec<GeneratedFile>
//!     CLI->>FS: write contract.json + all files
//!     CLI-->>User: generated N files
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use frontsync::pipeline::{GenerationTarget, Pipeline, PipelineConfig};
//!
//! let summary = Pipeline::new(config).run()?;
//! println!("wrote {} files", summary.files.len());
//! ```

pub mod cli;
pub mod contract;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod introspect;
pub mod pipeline;
pub mod typemap;

pub use contract::{Contract, Operation, SchemaType};
pub use descriptor::{load_model, SourceModel};
pub use error::{PipelineError, Result};
pub use pipeline::{GenerationTarget, Pipeline, PipelineConfig, RunSummary};
