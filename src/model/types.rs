use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Columns never included in a derived writable-field list
pub const GUARDED_COLUMNS: [&str; 4] = ["id", "created_at", "updated_at", "deleted_at"];

/// A persisted column declared in an entity manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name as stored
    pub name: String,
    /// Storage column type (e.g. `bigint`, `string`, `boolean`)
    #[serde(rename = "type")]
    pub db_type: String,
}

/// The three association shapes an entity can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    BelongsTo,
    HasMany,
    BelongsToMany,
}

/// An association descriptor declared in an entity's own manifest
///
/// Manifests have no inheritance, so every declared association belongs to
/// the entity itself. Optional fields fall back to conventional names
/// during detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationDecl {
    pub kind: AssociationKind,
    /// Accessor name the generated code uses (e.g. `user`, `comments`)
    pub accessor: String,
    /// Related model name (studly)
    pub model: String,
    /// Foreign-key column; defaults to `{accessor}_id` for belongs-to and
    /// `{snake(owner)}_id` for has-many
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    /// Pivot table for belongs-to-many; defaults to the two snake-cased
    /// model names, sorted, joined with `_`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<String>,
}

/// A parsed entity manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDef {
    /// Studly entity name (e.g. `Post`)
    pub model: String,
    /// Persisted table name
    pub table: String,
    /// Ordered column list
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    /// Declared writable-field allowlist; empty means "derive it"
    #[serde(default)]
    pub fillable: Vec<String>,
    /// Declared associations
    #[serde(default)]
    pub relations: Vec<AssociationDecl>,
    /// Manifest file this entity was loaded from
    #[serde(skip)]
    pub source: PathBuf,
}

/// Table name, column list, and writable fields extracted from an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    pub table: String,
    pub columns: Vec<String>,
    pub fillable: Vec<String>,
}

impl EntityDef {
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Storage type of a column, if the column is declared
    pub fn column_type(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.db_type.as_str())
    }

    /// Extract the schema descriptor, deriving the writable-field list when
    /// the manifest declares none
    ///
    /// A declared allowlist is filtered to known columns so that
    /// `fillable ⊆ columns` always holds.
    pub fn schema(&self) -> SchemaDescriptor {
        let columns = self.column_names();
        let fillable = if self.fillable.is_empty() {
            columns
                .iter()
                .filter(|c| !GUARDED_COLUMNS.contains(&c.as_str()))
                .cloned()
                .collect()
        } else {
            self.fillable
                .iter()
                .filter(|f| {
                    let known = self.has_column(f);
                    if !known {
                        tracing::debug!(
                            model = %self.model,
                            field = %f,
                            "fillable entry is not a declared column, dropping"
                        );
                    }
                    known
                })
                .cloned()
                .collect()
        };
        SchemaDescriptor {
            table: self.table.clone(),
            columns,
            fillable,
        }
    }
}

/// A discovered model: its studly name and the manifest it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRef {
    pub name: String,
    pub path: PathBuf,
}
