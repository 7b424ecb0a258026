//! # Model Module
//!
//! Entity-manifest discovery and schema extraction.
//!
//! An entity is described by a YAML (or JSON) manifest in the configured
//! models directory:
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
//! fillable: [title, user_id]
//! relations:
//!   - kind: belongs_to
//!     accessor: user
//!     model: User
//! ```
//!
//! Associations are declared explicitly rather than discovered by probing
//! runtime accessors; the manifest is the single source of truth for an
//! entity's persisted shape. Files in the models directory that do not
//! parse as manifests are ignored during discovery.

mod load;
mod types;

pub use load::{discover_models, load_entity, ModelRegistry};
pub use types::{
    AssociationDecl, AssociationKind, ColumnDef, EntityDef, ModelRef, SchemaDescriptor,
    GUARDED_COLUMNS,
};
