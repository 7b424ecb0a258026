//! # Introspection Module
//!
//! The core pipeline: turns an entity's schema and declared associations
//! into a normalized field-configuration list.
//!
//! ```text
//! entity manifest → relationship detection → foreign-key map
//!                 → per-field synthesis (+ optional user overrides)
//!                 → Vec<FieldConfig>
//! ```
//!
//! Both halves are stateless per-call transformations. Relationship probes
//! that fail to resolve are logged and excluded; they never abort a pass.

mod fields;
mod relations;
#[cfg(test)]
mod tests;

pub use fields::{apply_overrides, synthesize_field_configs, FieldConfig, FieldOverride};
pub use relations::{
    detect_relationships, guess_display_field, map_foreign_keys, BelongsToManyRel, BelongsToRel,
    HasManyRel, ProbeError, RelationshipSet,
};
