//! Backend descriptor model.
//!
//! Descriptors are the plain-data handoff from the backend: a thin adapter on
//! the backend side walks its ORM models and route table (it may use
//! reflection there, that is its business) and serializes the result as YAML
//! or JSON. This module deserializes that file; nothing downstream ever
//! touches the backend framework again.

use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Everything the backend exports for one generation run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceModel {
    #[serde(default)]
    pub entities: Vec<EntityDescriptor>,
    #[serde(default)]
    pub routes: Vec<RouteDescriptor>,
}

/// One ORM entity: name, owning backend module and ordered field list.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    /// Backend module the entity was declared in; used in collision reports.
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// A single field declaration with its framework-native type tag and
/// constraint metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default, rename = "enum")]
    pub enum_values: Vec<String>,
    #[serde(default)]
    pub precision: Option<u32>,
}

/// One HTTP route declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDescriptor {
    pub method: String,
    pub path: String,
    /// Whether the handler requires an authenticated caller.
    #[serde(default)]
    pub auth: bool,
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
    /// Entity name of the response payload, if the route returns one.
    #[serde(default)]
    pub response: Option<String>,
    /// True when the response is a collection of `response` items.
    #[serde(default)]
    pub response_many: bool,
}

/// A route parameter with its location tag.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Source type tag for path/query params; entity name for body params.
    #[serde(default, rename = "type")]
    pub param_type: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Body,
}

impl std::fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamLocation::Path => write!(f, "path"),
            ParamLocation::Query => write!(f, "query"),
            ParamLocation::Body => write!(f, "body"),
        }
    }
}

/// Load a descriptor file, choosing the parser by extension.
///
/// `.yaml`/`.yml` parse as YAML, anything else as JSON.
pub fn load_model(path: &Path) -> Result<SourceModel> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: display.clone(),
        source,
    })?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let model = if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
        serde_yaml::from_str(&content).map_err(|e| PipelineError::Parse {
            path: display,
            message: e.to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| PipelineError::Parse {
            path: display,
            message: e.to_string(),
        })?
    };
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_yaml_model() {
        let yaml = r#"
entities:
  - name: Product
    module: app.models.catalog
    fields:
      - name: id
        type: integer
      - name: price
        type: decimal
        nullable: true
routes:
  - method: GET
    path: /products/{id}
    auth: true
    params:
      - name: id
        in: path
        type: integer
    response: Product
"#;
        let model: SourceModel = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(model.entities.len(), 1);
        assert_eq!(model.entities[0].fields[1].source_type, "decimal");
        assert!(model.entities[0].fields[1].nullable);
        assert_eq!(model.routes[0].params[0].location, ParamLocation::Path);
        assert!(model.routes[0].auth);
        assert!(!model.routes[0].response_many);
    }

    #[test]
    fn load_model_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("model.json");
        let mut f = fs::File::create(&json_path).unwrap();
        write!(f, r#"{{"entities": [], "routes": []}}"#).unwrap();
        let model = load_model(&json_path).unwrap();
        assert!(model.entities.is_empty());
    }

    #[test]
    fn load_model_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.yaml");
        fs::write(&path, "entities: {not: [a, list}").unwrap();
        let err = load_model(&path).unwrap_err();
        assert_eq!(err.kind(), "ParseError");
    }
}
