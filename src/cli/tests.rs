//! Unit tests for CLI commands

use crate::cli::{Cli, Commands, Naming, Target};
use clap::Parser;

#[test]
fn test_generate_command_parses_defaults() {
    let cli = Cli::try_parse_from([
        "frontsync",
        "generate",
        "--input",
        "model.yaml",
        "--out",
        "src/api",
    ])
    .unwrap();

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
            assert_eq!(input.to_string_lossy(), "model.yaml");
            assert_eq!(out.to_string_lossy(), "src/api");
            assert_eq!(target, Target::Typescript);
            assert_eq!(naming, Naming::Camel);
            assert!(scope.is_none());
            assert_eq!(title, "API");
            assert_eq!(version, "0.1.0");
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_scope_accepts_comma_separated_entities() {
    let cli = Cli::try_parse_from([
        "frontsync",
        "generate",
        "--input",
        "model.yaml",
        "--out",
        "out",
        "--scope",
        "Product,Order",
        "--naming",
        "snake",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate { scope, naming, .. } => {
            assert_eq!(scope, Some(vec!["Product".to_string(), "Order".to_string()]));
            assert_eq!(naming, Naming::Snake);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_check_command_parses() {
    let cli = Cli::try_parse_from(["frontsync", "check", "--input", "model.json"]).unwrap();

    match cli.command {
        Commands::Check { input } => {
            assert_eq!(input.to_string_lossy(), "model.json");
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec![
            "frontsync",
            "generate",
            "--input",
            "model.yaml",
            "--out",
            "out",
        ],
        vec!["frontsync", "check", "--input", "model.yaml"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}
