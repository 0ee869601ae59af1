use crate::error::Result;
use crate::generator::NamingConvention;
use crate::pipeline::{GenerationTarget, Pipeline, PipelineConfig};
use crate::typemap::TargetLanguage;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line interface for frontsync
///
/// Provides commands for generating frontend code from backend descriptor
/// files and for validating descriptors without writing anything.
#[derive(Parser)]
#[command(name = "frontsync")]
#[command(about = "frontsync CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for frontsync
#[derive(Subcommand)]
pub enum Commands {
    /// Generate the typed client, stores and component scaffolds
    Generate {
        /// Path to the backend descriptor file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for generated files
        #[arg(short, long)]
        out: PathBuf,

        /// Target language for generated code
        #[arg(long, value_enum, default_value_t = Target::Typescript)]
        target: Target,

        /// Naming convention for generated callables
        #[arg(long, value_enum, default_value_t = Naming::Camel)]
        naming: Naming,

        /// Limit stores and components to specific entities (comma-separated
        /// or repeated); the client, types and contract always cover the
        /// full input
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        scope: Option<Vec<String>>,

        /// Title for the generated contract document
        #[arg(long, default_value = "API")]
        title: String,

        /// Version for the generated contract document
        #[arg(long, default_value = "0.1.0")]
        version: String,
    },
    /// Validate a descriptor file and print a contract summary
    ///
    /// Runs introspection and synthesis with the same strictness as
    /// `generate` but writes nothing. Exit code 1 with a JSON error on
    /// stderr when validation fails.
    Check {
        /// Path to the backend descriptor file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Target languages accepted on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Typescript,
}

impl From<Target> for TargetLanguage {
    fn from(value: Target) -> Self {
        match value {
            Target::Typescript => TargetLanguage::TypeScript,
        }
    }
}

/// Callable naming conventions accepted on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Naming {
    Camel,
    Snake,
}

impl From<Naming> for NamingConvention {
    fn from(value: Naming) -> Self {
        match value {
            Naming::Camel => NamingConvention::Camel,
            Naming::Snake => NamingConvention::Snake,
        }
    }
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The descriptor file cannot be read or parsed
/// - Introspection or synthesis rejects the input
/// - The write phase fails
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            input,
            out,
            target,
            naming,
            scope,
            title,
            version,
        } => {
            let config = PipelineConfig {
                input,
                target: GenerationTarget {
                    language: target.into(),
                    naming: naming.into(),
                    out_dir: out,
                },
                scope,
                title,
                version,
            };
            let summary = Pipeline::new(config).run()?;
            println!(
                "generated {} files from {} schemas and {} operations",
                summary.files.len(),
                summary.schemas,
                summary.operations
            );
            Ok(())
        }
        Commands::Check { input } => {
            let config = PipelineConfig {
                input,
                target: GenerationTarget {
                    language: TargetLanguage::TypeScript,
                    naming: NamingConvention::Camel,
                    out_dir: PathBuf::new(),
                },
                scope: None,
                title: "API".to_string(),
                version: "0.1.0".to_string(),
            };
            let contract = Pipeline::new(config).build_contract()?;
            println!(
                "ok: {} schemas, {} operations",
                contract.schemas.len(),
                contract.operations.len()
            );
            for op in &contract.operations {
                println!("  {} -> {}", op.display(), op.name);
            }
            Ok(())
        }
    }
}
