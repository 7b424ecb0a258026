//! # crudgen
//!
//! **crudgen** is a model-manifest driven CRUD scaffolding generator. It reads
//! entity manifests (YAML or JSON) describing models, their tables, columns,
//! and associations, resolves each model into a normalized field
//! configuration, and renders a complete CRUD slice for a Laravel + Inertia +
//! React project: a resource controller, optional form-request classes, a
//! TypeScript interface file, and the React page components.
//!
//! ## Overview
//!
//! Everything downstream of the manifest is derived: storage types are mapped
//! to input controls and TypeScript types, foreign keys are matched to their
//! declared belongs-to associations and turn into relationship selects, and
//! naming follows the usual Laravel conventions (StudlyCase models, snake
//! plural routes, title-cased labels).
//!
//! ## Architecture
//!
//! The library is organized into a small set of modules:
//!
//! - **[`model`]** - Entity manifest loading and the model registry
//! - **[`mapper`]** - Storage-type to input/TypeScript type mapping tables
//! - **[`introspect`]** - Relationship detection and field-configuration synthesis
//! - **[`generator`]** - Template rendering and CRUD slice emission
//! - **[`wiring`]** - Route and navigation registration in the host project
//! - **[`config`]** - `crudgen.toml` loading and defaults
//! - **[`cli`]** - The `crudgen` command-line interface
//!
//! ### Generation Flow
//!
//! ```text
//! models/*.yaml → ModelRegistry
//!               → detect_relationships → map_foreign_keys
//!               → synthesize_field_configs (+ overrides)
//!               → RenderContext → MiniJinja templates → project files
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crudgen::config::GeneratorConfig;
//! use crudgen::generator::{generate_crud, GenerateOptions};
//! use crudgen::model::ModelRegistry;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let root = Path::new(".");
//! let config = GeneratorConfig::resolve(None, root)?;
//! let registry = ModelRegistry::load(&root.join(&config.models_dir));
//! let opts = GenerateOptions {
//!     model: "Post".to_string(),
//!     with_requests: true,
//!     ..Default::default()
//! };
//! generate_crud(root, &config, &registry, &opts)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Manifest Format
//!
//! ```yaml
//! model: Post
//! table: posts
//! columns:
//!   - name: id
//!     type: bigint
//!   - name: title
//!     type: string
//!   - name: user_id
//!     type: bigint
//! relations:
//!   - kind: belongs_to
//!     accessor: user
//!     model: User
//! ```
//!
//! Columns named `id`, `created_at`, `updated_at`, and `deleted_at` are
//! treated as framework-managed and excluded from the writable field list
//! unless an explicit `fillable` allowlist is declared.

pub mod cli;
pub mod config;
mod error;
pub mod generator;
mod inflect;
pub mod introspect;
pub mod mapper;
pub mod model;
pub mod wiring;

pub use config::GeneratorConfig;
pub use error::Error;
pub use generator::{build_model_config, generate_crud, GenerateOptions, ModelConfig};
pub use introspect::{FieldConfig, FieldOverride, RelationshipSet};
pub use model::ModelRegistry;
