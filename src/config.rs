//! Generator configuration
//!
//! All configuration the pipeline consumes lives in an explicit
//! [`GeneratorConfig`] passed into each component; nothing reads ambient
//! global state. A `crudgen.toml` at the project root overrides the
//! defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output directories for generated files, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    pub controllers: PathBuf,
    pub requests: PathBuf,
    pub pages: PathBuf,
    pub types: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        OutputPaths {
            controllers: PathBuf::from("app/Http/Controllers"),
            requests: PathBuf::from("app/Http/Requests"),
            pages: PathBuf::from("resources/js/pages"),
            types: PathBuf::from("resources/js/types/models"),
        }
    }
}

/// Configuration consumed by the introspection pipeline and the emitters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory containing entity manifests, relative to the project root
    pub models_dir: PathBuf,
    /// Output directories for generated files
    pub paths: OutputPaths,
    /// Directory with template overrides; embedded templates are used for
    /// any name not present there
    pub templates_dir: Option<PathBuf>,
    /// Display-field candidates, checked in order against a related table's
    /// columns when building selection controls
    pub display_field_candidates: Vec<String>,
    /// Routes file that receives generated route declarations
    pub routes_file: PathBuf,
    /// Marker comment in the routes file; new routes are inserted before it
    pub routes_marker: String,
    /// Navigation config file that receives generated sidebar entries
    pub navigation_file: PathBuf,
    /// Marker comment in the navigation file
    pub navigation_marker: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            models_dir: PathBuf::from("models"),
            paths: OutputPaths::default(),
            templates_dir: None,
            display_field_candidates: default_display_candidates(),
            routes_file: PathBuf::from("routes/crud.php"),
            routes_marker: "// [CRUDGEN-ROUTES]".to_string(),
            navigation_file: PathBuf::from("config/crud-navigation.php"),
            navigation_marker: "// [CRUDGEN-NAV]".to_string(),
        }
    }
}

/// Default display-field candidate list, in priority order
pub fn default_display_candidates() -> Vec<String> {
    [
        "nome",
        "name",
        "title",
        "titulo",
        "label",
        "description",
        "descricao",
        "sigla",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GeneratorConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the effective configuration
    ///
    /// Priority:
    /// 1. Explicitly provided path (via CLI)
    /// 2. `crudgen.toml` at the project root, if present
    /// 3. Built-in defaults
    pub fn resolve(explicit_path: Option<&Path>, root: &Path) -> anyhow::Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }
        let detected = root.join("crudgen.toml");
        if detected.exists() {
            return Self::load(&detected);
        }
        Ok(Self::default())
    }
}
