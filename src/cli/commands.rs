use crate::config::DEFAULT_CONFIG_FILE;
use crate::generator::{generate_from_files, initialize, OPENAPI_SCAFFOLD_FILE};
use crate::logging::{init_logging_with_config, LogConfig};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Command-line interface for rog-codegen
#[derive(Debug, Parser)]
#[command(name = "rog-codegen", version)]
#[command(about = "Generate Ruby on Rails API boilerplate from OpenAPI 3 specifications", long_about = None)]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate controllers, services and routes from an OpenAPI document
    Generate {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long, default_value = OPENAPI_SCAFFOLD_FILE)]
        spec: PathBuf,

        /// Path to the rog-codegen configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Write a default .rog.yaml and a starter openapi.yaml into the current directory
    Init,
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate { spec, config } => {
            debug!(spec = %spec.display(), config = %config.display(), "Generating");
            generate_from_files(&spec, &config)?;
            Ok(())
        }
        Commands::Init => {
            let dir = Path::new(".");
            initialize(dir).context("failed to write scaffolds")?;
            println!("Generated {DEFAULT_CONFIG_FILE} and {OPENAPI_SCAFFOLD_FILE} successfully!");
            Ok(())
        }
    }
}

/// Parse arguments, install logging and run.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    init_logging_with_config(&log_config)?;
    run(cli)
}
