//! # Generator Module
//!
//! Turns a resolved model configuration into the CRUD slice files,
//! rendering MiniJinja templates into the target project tree.
//!
//! ## Overview
//!
//! One generation run for a model emits:
//! - **Controller** - A resource controller with index/store/update/destroy
//! - **Form Requests** - Optional Store/Update request classes
//! - **TypeScript Types** - An interface file mirroring the table columns
//! - **React Pages** - Index page, form dialog, column defs, and data table
//!
//! ## Architecture
//!
//! ```text
//! model manifest → field configuration → render context → templates → files
//! ```
//!
//! Every template has an embedded default; a configured `templates_dir`
//! can override any of them by file name. Existing output files are never
//! overwritten unless the run is forced.

mod project;
mod templates;

pub use project::{build_model_config, generate_crud, GenerateOptions, ModelConfig};
pub use templates::{
    environment, render_to, BelongsToProp, HasManyProp, RenderContext, TEMPLATE_NAMES,
};
