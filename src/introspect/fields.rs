use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::relations::BelongsToRel;
use crate::inflect;
use crate::mapper::{self, InputKind, TsType};
use crate::model::{EntityDef, ModelRegistry};

/// The normalized per-field configuration record driving template emission
///
/// Serialized field names are camelCase, matching the JSON consumed by the
/// wizard UI and the override file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub name: String,
    pub label: String,
    pub db_type: String,
    pub input_type: InputKind,
    pub ts_type: TsType,
    pub required: bool,
    pub validation: String,
    pub is_relationship: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_columns: Option<Vec<String>>,
}

/// A user-supplied override for one field, matched by `name`
///
/// Every value is optional; omitted values keep the detected configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldOverride {
    pub name: String,
    pub label: Option<String>,
    pub input_type: Option<InputKind>,
    pub ts_type: Option<TsType>,
    pub required: Option<bool>,
    pub validation: Option<String>,
    pub is_relationship: Option<bool>,
    pub relationship_type: Option<String>,
    pub relationship_method: Option<String>,
    pub related_model: Option<String>,
    pub related_table: Option<String>,
    pub display_field: Option<String>,
}

/// Build the field-configuration list for an entity's writable fields
///
/// For each field, in input order: the storage type is mapped through the
/// type tables; fields whose name appears in the foreign-key map become the
/// relationship variant (label from the title-cased accessor, a
/// relationship select, and an existence check against the related table).
/// An empty field list yields an empty result.
pub fn synthesize_field_configs(
    entity: &EntityDef,
    fillable: &[String],
    fk_map: &HashMap<String, BelongsToRel>,
    registry: &ModelRegistry,
) -> Vec<FieldConfig> {
    fillable
        .iter()
        .map(|field| {
            let db_type = entity.column_type(field).unwrap_or("string").to_string();
            let mapping = mapper::map_db_type(&db_type);
            let mut config = FieldConfig {
                name: field.clone(),
                label: inflect::title(field),
                db_type,
                input_type: mapping.input,
                ts_type: mapping.ts_type,
                required: true,
                validation: mapper::default_validation(mapping.input).to_string(),
                is_relationship: false,
                relationship_type: None,
                relationship_method: None,
                related_model: None,
                related_table: None,
                display_field: None,
                related_columns: None,
            };

            if let Some(rel) = fk_map.get(field) {
                let related_columns = registry
                    .find_by_table(&rel.related_table)
                    .map(|e| e.column_names())
                    .unwrap_or_default();
                config.is_relationship = true;
                config.relationship_type = Some("belongsTo".to_string());
                config.relationship_method = Some(rel.method.clone());
                config.related_model = Some(rel.related_model.clone());
                config.related_table = Some(rel.related_table.clone());
                config.display_field = Some(rel.display_field.clone());
                config.related_columns = Some(related_columns);
                config.input_type = InputKind::RelationshipSelect;
                config.label = inflect::title(&rel.method);
                config.validation = format!("required|exists:{},id", rel.related_table);
            }

            config
        })
        .collect()
}

/// Merge user override records into detected field configurations
///
/// Overrides are matched by `name`; unmatched overrides are ignored. When
/// an override marks a field as a relationship but omits relationship data,
/// the detected relationship (already on the field) backfills it.
pub fn apply_overrides(fields: &mut [FieldConfig], overrides: &[FieldOverride]) {
    for field in fields.iter_mut() {
        let Some(ov) = overrides.iter().find(|o| o.name == field.name) else {
            continue;
        };

        if let Some(label) = &ov.label {
            field.label = label.clone();
        }
        if let Some(input) = ov.input_type {
            field.input_type = input;
        }
        if let Some(ts) = ov.ts_type {
            field.ts_type = ts;
        }
        if let Some(required) = ov.required {
            field.required = required;
        }
        if let Some(validation) = &ov.validation {
            field.validation = validation.clone();
        }

        let is_relationship = ov
            .is_relationship
            .unwrap_or(field.input_type == InputKind::RelationshipSelect || field.is_relationship);

        if is_relationship {
            field.is_relationship = true;
            if let Some(v) = &ov.relationship_type {
                field.relationship_type = Some(v.clone());
            } else if field.relationship_type.is_none() {
                field.relationship_type = Some("belongsTo".to_string());
            }
            if let Some(v) = &ov.relationship_method {
                field.relationship_method = Some(v.clone());
            }
            if let Some(v) = &ov.related_model {
                field.related_model = Some(v.clone());
            }
            if let Some(v) = &ov.related_table {
                field.related_table = Some(v.clone());
            }
            if let Some(v) = &ov.display_field {
                field.display_field = Some(v.clone());
            }
        } else {
            field.is_relationship = false;
            field.relationship_type = None;
            field.relationship_method = None;
            field.related_model = None;
            field.related_table = None;
            field.display_field = None;
            field.related_columns = None;
        }
    }
}
