//! # CLI Module
//!
//! Command-line interface for the crudgen scaffolding generator.
//!
//! ## Commands
//!
//! ### `models`
//!
//! List the model manifests discovered under the configured models
//! directory:
//!
//! ```bash
//! crudgen models --root .
//! ```
//!
//! ### `inspect`
//!
//! Print the resolved field configuration for one model as JSON. This is
//! the same structure the generator renders from, so it is the quickest
//! way to check what a manifest resolves to:
//!
//! ```bash
//! crudgen inspect Post --root .
//! ```
//!
//! ### `generate`
//!
//! Generate the CRUD slice for a model:
//!
//! ```bash
//! crudgen generate Post --root . --with-requests --add-routes --add-nav-item
//! ```
//!
//! Options:
//! - `--force` - Overwrite existing generated files
//! - `--with-requests` - Also emit Store/Update form-request classes
//! - `--overrides <JSON>` - Field overrides (inline JSON array or `@file`)
//! - `--add-routes` / `--add-nav-item` - Wire the resource into the project
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use crudgen::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
