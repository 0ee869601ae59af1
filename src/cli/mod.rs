//! # CLI Module
//!
//! Command-line entry points for the frontsync generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Run the full pipeline against a descriptor file:
//!
//! ```bash
//! frontsync generate --input model.yaml --out frontend/src/api
//! ```
//!
//! Options:
//! - `--input <FILE>` - Backend descriptor file, YAML or JSON (required)
//! - `--out <DIR>` - Output directory (required)
//! - `--target <LANG>` - Target language (default: typescript)
//! - `--naming <STYLE>` - Callable naming convention: camel, snake
//! - `--scope <ENTITIES>` - Limit stores/components to these entities
//! - `--title <TITLE>` / `--version <VER>` - Contract document metadata
//!
//! ### `check`
//!
//! Validate a descriptor without writing anything:
//!
//! ```bash
//! frontsync check --input model.yaml
//! ```
//!
//! Failures print one machine-readable JSON object on stderr and exit 1.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands, Naming, Target};
