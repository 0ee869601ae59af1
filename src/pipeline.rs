//! Pipeline orchestration.
//!
//! A run walks fixed stages: load descriptors, introspect, synthesize the
//! contract, fan generation out across threads, then write. Every output
//! file is rendered in memory before the write phase starts, so a failure in
//! any stage leaves the output directory untouched.

use crate::contract::{contract_json, synthesize, Contract};
use crate::descriptor::load_model;
use crate::error::{PipelineError, Result};
use crate::generator::{
    generate_client, generate_components, generate_stores, generate_types, GeneratedFile,
    NamingConvention,
};
use crate::introspect::{introspect_entities, introspect_routes};
use crate::typemap::TargetLanguage;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Where and how generated code is emitted.
#[derive(Debug, Clone)]
pub struct GenerationTarget {
    pub language: TargetLanguage,
    pub naming: NamingConvention,
    pub out_dir: PathBuf,
}

/// Everything one generation run needs; built by the CLI, no globals.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Descriptor file exported by the backend (YAML or JSON).
    pub input: PathBuf,
    pub target: GenerationTarget,
    /// Entity names to generate stores/components for; `None` means all.
    /// The client, types and contract always cover the full input.
    pub scope: Option<Vec<String>>,
    pub title: String,
    pub version: String,
}

/// Stage markers for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Introspecting,
    Synthesizing,
    Generating,
    Writing,
    Done,
    Failed,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Introspecting => "introspecting",
            Stage::Synthesizing => "synthesizing",
            Stage::Generating => "generating",
            Stage::Writing => "writing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub schemas: usize,
    pub operations: usize,
    /// Paths written, relative to the output directory.
    pub files: Vec<PathBuf>,
}

/// One generation run over a single descriptor file.
pub struct Pipeline {
    config: PipelineConfig,
    stage: Stage,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline {
            config,
            stage: Stage::Idle,
        }
    }

    fn enter(&mut self, stage: Stage) {
        tracing::info!(from = self.stage.as_str(), to = stage.as_str(), "stage");
        self.stage = stage;
    }

    /// Validate the input and synthesize the contract without generating
    /// anything. This is the whole of `frontsync check`.
    pub fn build_contract(&mut self) -> Result<Contract> {
        self.enter(Stage::Introspecting);
        let model = load_model(&self.config.input)?;
        let schemas = introspect_entities(&model.entities)?;
        let operations = introspect_routes(&model.routes)?;

        self.enter(Stage::Synthesizing);
        synthesize(&self.config.title, &self.config.version, schemas, operations)
    }

    /// Run the full pipeline: contract, generators, write phase.
    pub fn run(mut self) -> Result<RunSummary> {
        let contract = match self.build_contract() {
            Ok(contract) => contract,
            Err(err) => {
                self.enter(Stage::Failed);
                return Err(err);
            }
        };

        self.enter(Stage::Generating);
        let files = render_all(&contract, &self.config);

        self.enter(Stage::Writing);
        if let Err(err) = write_all(&self.config.target.out_dir, &files) {
            self.enter(Stage::Failed);
            return Err(err);
        }

        self.enter(Stage::Done);
        Ok(RunSummary {
            schemas: contract.schemas.len(),
            operations: contract.operations.len(),
            files: files.into_iter().map(|f| f.path).collect(),
        })
    }
}

/// Render every output file in memory. The three generator families are
/// independent reads of the same immutable contract, so they run on scoped
/// threads.
fn render_all(contract: &Contract, config: &PipelineConfig) -> Vec<GeneratedFile> {
    let language = config.target.language;
    let naming = config.target.naming;
    let scope = config.scope.as_deref();

    let (client_files, store_files, component_files) = std::thread::scope(|s| {
        let client = s.spawn(|| {
            vec![
                generate_types(contract, language),
                generate_client(contract, language, naming),
            ]
        });
        let stores = s.spawn(|| generate_stores(contract, language, naming, scope));
        let components = s.spawn(|| generate_components(contract, naming, scope));
        (join(client), join(stores), join(components))
    });

    let mut files = Vec::new();
    files.push(GeneratedFile::new("contract.json", contract_json(contract)));
    files.extend(client_files);
    files.extend(store_files);
    files.extend(component_files);
    files
}

fn join<T>(handle: std::thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// Write phase: all files or none. Rendering already succeeded by the time
/// this runs, so the only failures left are I/O.
fn write_all(out_dir: &Path, files: &[GeneratedFile]) -> Result<()> {
    fs::create_dir_all(out_dir).map_err(|source| PipelineError::Io {
        path: out_dir.display().to_string(),
        source,
    })?;
    for file in files {
        let path = out_dir.join(&file.path);
        fs::write(&path, &file.contents).map_err(|source| PipelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut hasher = Sha256::new();
        hasher.update(file.contents.as_bytes());
        tracing::debug!(
            path = %path.display(),
            sha256 = %format!("{:x}", hasher.finalize()),
            "wrote file"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_descriptor(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("model.yaml");
        #[allow(clippy::unwrap_used)]
        fs::write(&path, body).unwrap();
        path
    }

    fn config(input: PathBuf, out_dir: PathBuf) -> PipelineConfig {
        PipelineConfig {
            input,
            target: GenerationTarget {
                language: TargetLanguage::TypeScript,
                naming: NamingConvention::Camel,
                out_dir,
            },
            scope: None,
            title: "test".to_string(),
            version: "0.1.0".to_string(),
        }
    }

    const MODEL: &str = r#"
entities:
  - name: Product
    module: app.models.catalog
    fields:
      - name: id
        type: integer
      - name: name
        type: string
routes:
  - method: GET
    path: /products
    response: Product
    response_many: true
  - method: GET
    path: /products/{id}
    params:
      - name: id
        in: path
        type: integer
    response: Product
"#;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn run_writes_full_output_set() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_descriptor(dir.path(), MODEL);
        let out = dir.path().join("out");
        let summary = Pipeline::new(config(input, out.clone())).run().unwrap();
        assert_eq!(summary.schemas, 1);
        assert_eq!(summary.operations, 2);
        assert!(out.join("contract.json").exists());
        assert!(out.join("types.ts").exists());
        assert!(out.join("client.ts").exists());
        assert!(out.join("store.product.ts").exists());
        assert!(out.join("ProductList.vue").exists());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn failed_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // Response references an entity that was never declared.
        let input = write_descriptor(
            dir.path(),
            r#"
entities: []
routes:
  - method: GET
    path: /products
    response: Product
    response_many: true
"#,
        );
        let out = dir.path().join("out");
        let err = Pipeline::new(config(input, out.clone())).run().unwrap_err();
        assert_eq!(err.kind(), "ReferenceError");
        assert!(!out.exists());
    }
}
