use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::types::{EntityDef, ModelRef};
use crate::error::Error;
use crate::inflect;

/// Load a single entity manifest from a YAML or JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or lacks a
/// `model`/`table` declaration.
pub fn load_entity(path: &Path) -> anyhow::Result<EntityDef> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let mut entity: EntityDef = if path.extension().map(|s| s == "json").unwrap_or(false) {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?
    };
    if entity.model.trim().is_empty() || entity.table.trim().is_empty() {
        anyhow::bail!(
            "Manifest {} must declare both 'model' and 'table'",
            path.display()
        );
    }
    entity.source = path.to_path_buf();
    Ok(entity)
}

/// Discover entity manifests in a models directory
///
/// Returns an empty list when the directory is absent. Files that do not
/// parse as manifests are skipped. Order follows directory enumeration
/// order; callers must not assume stability beyond "each entity appears
/// exactly once".
pub fn discover_models(dir: &Path) -> Vec<ModelRef> {
    let mut models = Vec::new();
    let Ok(entries) = fs::read_dir(dir) else {
        return models;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let is_manifest = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e, "yaml" | "yml" | "json"))
            .unwrap_or(false);
        if !is_manifest {
            continue;
        }
        match load_entity(&path) {
            Ok(entity) => models.push(ModelRef {
                name: entity.model,
                path,
            }),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "skipping non-manifest file");
            }
        }
    }
    models
}

/// In-memory index of every manifest in the models directory
///
/// Keyed by studly model name and, secondarily, by table name so that
/// relationship detection can resolve a related table's column list.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    entities: Vec<EntityDef>,
    by_name: HashMap<String, usize>,
    by_table: HashMap<String, usize>,
}

impl ModelRegistry {
    /// Load every manifest from a models directory
    ///
    /// A duplicate model name keeps the first manifest seen and logs the
    /// duplicate, so each entity appears exactly once.
    pub fn load(dir: &Path) -> Self {
        let refs = discover_models(dir);
        let mut entities = Vec::with_capacity(refs.len());
        for model_ref in &refs {
            match load_entity(&model_ref.path) {
                Ok(entity) => entities.push(entity),
                Err(err) => {
                    tracing::debug!(path = %model_ref.path.display(), error = %err, "skipping manifest");
                }
            }
        }
        Self::from_entities(entities)
    }

    /// Build a registry from already-parsed entities
    pub fn from_entities(entities: Vec<EntityDef>) -> Self {
        let mut registry = ModelRegistry::default();
        for entity in entities {
            let key = inflect::studly(&entity.model);
            if registry.by_name.contains_key(&key) {
                tracing::warn!(model = %key, "duplicate model manifest, keeping the first");
                continue;
            }
            let idx = registry.entities.len();
            registry.by_name.insert(key, idx);
            registry.by_table.insert(entity.table.clone(), idx);
            registry.entities.push(entity);
        }
        registry
    }

    /// Resolve a model by name (any casing; normalized to studly)
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelNotFound`] when no manifest declares the model.
    pub fn get(&self, name: &str) -> Result<&EntityDef, Error> {
        let key = inflect::studly(name);
        self.by_name
            .get(&key)
            .map(|&idx| &self.entities[idx])
            .ok_or(Error::ModelNotFound { model: key })
    }

    /// Resolve an entity by its table name
    pub fn find_by_table(&self, table: &str) -> Option<&EntityDef> {
        self.by_table.get(table).map(|&idx| &self.entities[idx])
    }

    /// All loaded entities, in discovery order
    pub fn entities(&self) -> &[EntityDef] {
        &self.entities
    }

    /// Discovered models as `{name, path}` references, in discovery order
    pub fn models(&self) -> Vec<ModelRef> {
        self.entities
            .iter()
            .map(|e| ModelRef {
                name: e.model.clone(),
                path: e.source.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
