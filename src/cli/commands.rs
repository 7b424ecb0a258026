use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::generator::{build_model_config, generate_crud, GenerateOptions};
use crate::introspect::FieldOverride;
use crate::model::ModelRegistry;
use crate::wiring;

/// Command-line interface for crudgen
///
/// Provides commands for listing model manifests, inspecting resolved
/// field configurations, and generating CRUD slices.
#[derive(Parser)]
#[command(name = "crudgen")]
#[command(about = "Model-manifest driven CRUD scaffolding generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for crudgen
#[derive(Subcommand)]
pub enum Commands {
    /// List the model manifests discovered in the models directory
    Models {
        /// Project root containing the models directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Path to a crudgen.toml (default: {root}/crudgen.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the resolved field configuration for a model as JSON
    Inspect {
        /// Model name (StudlyCase or snake_case)
        model: String,

        /// Project root containing the models directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Path to a crudgen.toml (default: {root}/crudgen.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Field overrides as a JSON array, or @path to a JSON file
        #[arg(long)]
        overrides: Option<String>,
    },
    /// Generate the CRUD slice for a model
    Generate {
        /// Model name (StudlyCase or snake_case)
        model: String,

        /// Project root that receives the generated files
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Path to a crudgen.toml (default: {root}/crudgen.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Also emit Store/Update form-request classes
        #[arg(long, default_value_t = false)]
        with_requests: bool,

        /// Field overrides as a JSON array, or @path to a JSON file
        #[arg(long)]
        overrides: Option<String>,

        /// Register the resource routes in the routes file
        #[arg(long, default_value_t = false)]
        add_routes: bool,

        /// Add a sidebar entry to the navigation config
        #[arg(long, default_value_t = false)]
        add_nav_item: bool,

        /// Icon name for the navigation entry
        #[arg(long, default_value = "Database")]
        nav_icon: String,
    },
}

/// Parse the `--overrides` value: inline JSON, or `@path` to a JSON file
pub(super) fn parse_overrides(value: &str) -> anyhow::Result<Vec<FieldOverride>> {
    let json = match value.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read overrides file {path}: {e}"))?,
        None => value.to_string(),
    };
    serde_json::from_str(&json).map_err(|e| anyhow::anyhow!("Invalid overrides JSON: {e}"))
}

fn load_registry(root: &Path, config: &GeneratorConfig) -> ModelRegistry {
    ModelRegistry::load(&root.join(&config.models_dir))
}

/// Execute a parsed CLI command
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Models { root, config } => {
            let config = GeneratorConfig::resolve(config.as_deref(), &root)?;
            let registry = load_registry(&root, &config);
            if registry.is_empty() {
                println!(
                    "⚠️  No model manifests found in {:?}",
                    root.join(&config.models_dir)
                );
                return Ok(());
            }
            for entity in registry.entities() {
                println!(
                    "{}  table: {}  ({})",
                    entity.model,
                    entity.table,
                    entity.source.display()
                );
            }
            Ok(())
        }
        Commands::Inspect {
            model,
            root,
            config,
            overrides,
        } => {
            let config = GeneratorConfig::resolve(config.as_deref(), &root)?;
            let registry = load_registry(&root, &config);
            let overrides = overrides.as_deref().map(parse_overrides).transpose()?;
            let mc = build_model_config(&model, &registry, &config, overrides.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&mc)?);
            Ok(())
        }
        Commands::Generate {
            model,
            root,
            config,
            force,
            with_requests,
            overrides,
            add_routes,
            add_nav_item,
            nav_icon,
        } => {
            let config = GeneratorConfig::resolve(config.as_deref(), &root)?;
            let registry = load_registry(&root, &config);
            let overrides = overrides.as_deref().map(parse_overrides).transpose()?;
            let opts = GenerateOptions {
                model: model.clone(),
                force,
                with_requests,
                overrides,
            };
            let written = generate_crud(&root, &config, &registry, &opts)?;
            if add_routes {
                wiring::add_crud_routes(&root, &config, &model)?;
            }
            if add_nav_item {
                wiring::add_navigation_item(&root, &config, &model, &nav_icon)?;
            }
            println!("✅ Done: {} file(s) written for {model}", written.len());
            Ok(())
        }
    }
}
