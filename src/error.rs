//! Pipeline error taxonomy.
//!
//! Every error in this enum is fatal: the pipeline aborts before any output
//! file is written, so a failed run never leaves a partially generated tree
//! behind. The CLI renders errors as a single machine-readable JSON object on
//! stderr (see [`PipelineError::to_json`]).

use serde_json::{json, Value};
use thiserror::Error;

/// Fatal pipeline failures.
///
/// The first four variants form the contract-level taxonomy (mapping,
/// route validation, collision, reference). `Io` and `Parse` cover the
/// descriptor-loading boundary.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A source type tag has no entry in the type mapping table.
    #[error("unmapped source type `{source_type}` on {entity}.{field}")]
    Mapping {
        entity: String,
        field: String,
        source_type: String,
    },

    /// A route declaration is structurally invalid.
    #[error("invalid route `{route}`: {reason}")]
    RouteValidation { route: String, reason: String },

    /// Two distinct declarations normalize to the same output name.
    #[error("name collision on `{name}`: declared by both {first} and {second}")]
    Collision {
        name: String,
        first: String,
        second: String,
    },

    /// An operation references a schema that was never introspected.
    #[error("operation `{operation}` references unknown schema `{schema}`")]
    Reference { operation: String, schema: String },

    /// Reading the descriptor file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor file is not valid YAML/JSON for the expected shape.
    #[error("failed to parse `{path}`: {message}")]
    Parse { path: String, message: String },
}

impl PipelineError {
    /// Stable error kind tag used in the machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Mapping { .. } => "MappingError",
            PipelineError::RouteValidation { .. } => "RouteValidationError",
            PipelineError::Collision { .. } => "CollisionError",
            PipelineError::Reference { .. } => "ReferenceError",
            PipelineError::Io { .. } => "IoError",
            PipelineError::Parse { .. } => "ParseError",
        }
    }

    /// Machine-readable rendering for the CLI exit path.
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        })
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_match_taxonomy() {
        let err = PipelineError::Mapping {
            entity: "Product".into(),
            field: "price".into(),
            source_type: "money".into(),
        };
        assert_eq!(err.kind(), "MappingError");
        assert!(err.to_string().contains("Product.price"));

        let err = PipelineError::Collision {
            name: "order".into(),
            first: "sales.Order".into(),
            second: "mfg.Order".into(),
        };
        assert_eq!(err.kind(), "CollisionError");
    }

    #[test]
    fn json_shape_is_stable() {
        let err = PipelineError::Reference {
            operation: "getProduct".into(),
            schema: "Product".into(),
        };
        let v = err.to_json();
        assert_eq!(v["error"]["kind"], "ReferenceError");
        assert!(v["error"]["message"].as_str().unwrap().contains("Product"));
    }
}
