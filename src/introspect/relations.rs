use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::inflect;
use crate::model::{AssociationKind, EntityDef, ModelRegistry};

/// A resolved to-one association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BelongsToRel {
    /// Accessor name declared on the owning entity
    pub method: String,
    pub foreign_key: String,
    pub related_model: String,
    /// Manifest file the related model was loaded from
    pub related_source: String,
    pub related_table: String,
    /// Column chosen to represent related records in selection controls
    pub display_field: String,
}

/// A resolved to-many association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasManyRel {
    pub method: String,
    pub related_model: String,
    pub foreign_key: String,
}

/// A resolved to-many-through-pivot association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BelongsToManyRel {
    pub method: String,
    pub related_model: String,
    pub pivot_table: String,
}

/// Relationships detected for one entity, bucketed by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipSet {
    pub belongs_to: Vec<BelongsToRel>,
    pub has_many: Vec<HasManyRel>,
    pub belongs_to_many: Vec<BelongsToManyRel>,
}

/// Why a declared association was excluded from the results
///
/// Probe failures are recovered locally: the association is skipped with a
/// warning and the rest of the detection pass is unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The related model has no manifest in the registry
    UnknownModel { accessor: String, model: String },
    /// A second association reused an accessor name within the same kind bucket
    DuplicateAccessor { accessor: String },
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::UnknownModel { accessor, model } => {
                write!(
                    f,
                    "accessor '{}' references unknown model '{}'",
                    accessor, model
                )
            }
            ProbeError::DuplicateAccessor { accessor } => {
                write!(f, "duplicate accessor '{}' in the same kind bucket", accessor)
            }
        }
    }
}

enum Probed {
    BelongsTo(BelongsToRel),
    HasMany(HasManyRel),
    BelongsToMany(BelongsToManyRel),
}

/// Pick the display field for a table's column list
///
/// Iterates the configured candidate list in order and returns the first
/// candidate present among the columns; candidate order wins over column
/// order. Falls back to `"id"` when nothing matches.
pub fn guess_display_field(columns: &[String], candidates: &[String]) -> String {
    candidates
        .iter()
        .find(|candidate| columns.contains(candidate))
        .cloned()
        .unwrap_or_else(|| "id".to_string())
}

/// Detect an entity's relationships from its declared associations
///
/// Each association is probed independently: resolution failures are logged
/// and skipped rather than aborting the pass, and accessor names are unique
/// per kind bucket. Result order follows declaration order.
pub fn detect_relationships(
    entity: &EntityDef,
    registry: &ModelRegistry,
    display_candidates: &[String],
) -> RelationshipSet {
    let mut set = RelationshipSet::default();
    let mut seen_belongs_to = HashSet::new();
    let mut seen_has_many = HashSet::new();
    let mut seen_belongs_to_many = HashSet::new();

    for decl in &entity.relations {
        let seen = match decl.kind {
            AssociationKind::BelongsTo => &mut seen_belongs_to,
            AssociationKind::HasMany => &mut seen_has_many,
            AssociationKind::BelongsToMany => &mut seen_belongs_to_many,
        };
        let result = if !seen.insert(decl.accessor.clone()) {
            Err(ProbeError::DuplicateAccessor {
                accessor: decl.accessor.clone(),
            })
        } else {
            probe(entity, decl, registry, display_candidates)
        };
        match result {
            Ok(Probed::BelongsTo(rel)) => set.belongs_to.push(rel),
            Ok(Probed::HasMany(rel)) => set.has_many.push(rel),
            Ok(Probed::BelongsToMany(rel)) => set.belongs_to_many.push(rel),
            Err(err) => {
                tracing::warn!(
                    model = %entity.model,
                    accessor = %decl.accessor,
                    error = %err,
                    "skipping association"
                );
            }
        }
    }

    set
}

fn probe(
    entity: &EntityDef,
    decl: &crate::model::AssociationDecl,
    registry: &ModelRegistry,
    display_candidates: &[String],
) -> Result<Probed, ProbeError> {
    let related = registry
        .get(&decl.model)
        .map_err(|_| ProbeError::UnknownModel {
            accessor: decl.accessor.clone(),
            model: decl.model.clone(),
        })?;

    match decl.kind {
        AssociationKind::BelongsTo => {
            let foreign_key = decl
                .foreign_key
                .clone()
                .unwrap_or_else(|| format!("{}_id", inflect::snake(&decl.accessor)));
            let related_columns = related.column_names();
            Ok(Probed::BelongsTo(BelongsToRel {
                method: decl.accessor.clone(),
                foreign_key,
                related_model: related.model.clone(),
                related_source: related.source.display().to_string(),
                related_table: related.table.clone(),
                display_field: guess_display_field(&related_columns, display_candidates),
            }))
        }
        AssociationKind::HasMany => {
            let foreign_key = decl
                .foreign_key
                .clone()
                .unwrap_or_else(|| format!("{}_id", inflect::snake(&entity.model)));
            Ok(Probed::HasMany(HasManyRel {
                method: decl.accessor.clone(),
                related_model: related.model.clone(),
                foreign_key,
            }))
        }
        AssociationKind::BelongsToMany => {
            let pivot_table = decl
                .pivot
                .clone()
                .unwrap_or_else(|| default_pivot_table(&entity.model, &related.model));
            Ok(Probed::BelongsToMany(BelongsToManyRel {
                method: decl.accessor.clone(),
                related_model: related.model.clone(),
                pivot_table,
            }))
        }
    }
}

/// Conventional pivot-table name: both snake-cased model names, sorted,
/// joined with an underscore (`Post` + `Tag` → `post_tag`)
fn default_pivot_table(a: &str, b: &str) -> String {
    let mut names = [inflect::snake(a), inflect::snake(b)];
    names.sort();
    names.join("_")
}

/// Project the belongs-to bucket into a foreign-key lookup map
///
/// Only belongs-to descriptors participate. When two descriptors share a
/// foreign-key column the later one wins and the replacement is logged.
pub fn map_foreign_keys(relationships: &RelationshipSet) -> HashMap<String, BelongsToRel> {
    let mut map: HashMap<String, BelongsToRel> = HashMap::new();
    for rel in &relationships.belongs_to {
        if let Some(previous) = map.insert(rel.foreign_key.clone(), rel.clone()) {
            tracing::warn!(
                foreign_key = %rel.foreign_key,
                replaced = %previous.method,
                winner = %rel.method,
                "multiple belongs-to relationships share a foreign key; last one wins"
            );
        }
    }
    map
}
