#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::default_display_candidates;
use crate::mapper::{InputKind, TsType};
use crate::model::{AssociationDecl, AssociationKind, ColumnDef, EntityDef, ModelRegistry};
use std::path::PathBuf;

fn columns(specs: &[(&str, &str)]) -> Vec<ColumnDef> {
    specs
        .iter()
        .map(|(name, ty)| ColumnDef {
            name: name.to_string(),
            db_type: ty.to_string(),
        })
        .collect()
}

fn entity(model: &str, table: &str, cols: &[(&str, &str)]) -> EntityDef {
    EntityDef {
        model: model.to_string(),
        table: table.to_string(),
        columns: columns(cols),
        fillable: vec![],
        relations: vec![],
        source: PathBuf::from(format!("models/{}.yaml", model.to_lowercase())),
    }
}

fn assoc(kind: AssociationKind, accessor: &str, model: &str) -> AssociationDecl {
    AssociationDecl {
        kind,
        accessor: accessor.to_string(),
        model: model.to_string(),
        foreign_key: None,
        pivot: None,
    }
}

fn user_entity() -> EntityDef {
    entity(
        "User",
        "users",
        &[("id", "bigint"), ("name", "string"), ("email", "string")],
    )
}

fn post_entity() -> EntityDef {
    let mut post = entity(
        "Post",
        "posts",
        &[
            ("id", "bigint"),
            ("title", "string"),
            ("body", "text"),
            ("user_id", "bigint"),
            ("created_at", "timestamp"),
        ],
    );
    post.relations = vec![
        AssociationDecl {
            foreign_key: Some("user_id".into()),
            ..assoc(AssociationKind::BelongsTo, "user", "User")
        },
        assoc(AssociationKind::HasMany, "comments", "Comment"),
        assoc(AssociationKind::BelongsToMany, "tags", "Tag"),
    ];
    post
}

fn full_registry() -> ModelRegistry {
    ModelRegistry::from_entities(vec![
        post_entity(),
        user_entity(),
        entity(
            "Comment",
            "comments",
            &[("id", "bigint"), ("body", "text"), ("post_id", "bigint")],
        ),
        entity("Tag", "tags", &[("id", "bigint"), ("name", "string")]),
    ])
}

#[test]
fn test_guess_display_field_candidate_order_wins() {
    // Column order would put description first; candidate order prefers name.
    let cols: Vec<String> = ["id", "description", "name", "title", "created_at"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(guess_display_field(&cols, &default_display_candidates()), "name");
}

#[test]
fn test_guess_display_field_falls_back_to_id() {
    let cols: Vec<String> = ["uuid", "amount"].iter().map(|s| s.to_string()).collect();
    assert_eq!(guess_display_field(&cols, &default_display_candidates()), "id");
    assert_eq!(guess_display_field(&[], &default_display_candidates()), "id");
}

#[test]
fn test_guess_display_field_respects_custom_candidates() {
    let cols: Vec<String> = ["id", "name", "sigla"].iter().map(|s| s.to_string()).collect();
    let candidates: Vec<String> = vec!["sigla".into(), "name".into()];
    assert_eq!(guess_display_field(&cols, &candidates), "sigla");
}

#[test]
fn test_detect_relationships_buckets_each_kind() {
    let registry = full_registry();
    let post = registry.get("Post").unwrap();
    let rels = detect_relationships(post, &registry, &default_display_candidates());

    assert_eq!(rels.belongs_to.len(), 1);
    assert_eq!(rels.has_many.len(), 1);
    assert_eq!(rels.belongs_to_many.len(), 1);

    let user = &rels.belongs_to[0];
    assert_eq!(user.method, "user");
    assert_eq!(user.foreign_key, "user_id");
    assert_eq!(user.related_model, "User");
    assert_eq!(user.related_table, "users");
    assert_eq!(user.display_field, "name");

    let comments = &rels.has_many[0];
    assert_eq!(comments.method, "comments");
    // Default has-many foreign key is derived from the owning model.
    assert_eq!(comments.foreign_key, "post_id");

    let tags = &rels.belongs_to_many[0];
    assert_eq!(tags.method, "tags");
    assert_eq!(tags.pivot_table, "post_tag");
}

#[test]
fn test_detect_relationships_skips_failed_probes() {
    let mut post = post_entity();
    // A probe against a model with no manifest fails and is excluded; the
    // other associations are unaffected.
    post.relations
        .push(assoc(AssociationKind::BelongsTo, "category", "Category"));
    let registry = full_registry();

    let rels = detect_relationships(&post, &registry, &default_display_candidates());
    assert_eq!(rels.belongs_to.len(), 1);
    assert_eq!(rels.belongs_to[0].method, "user");
    assert_eq!(rels.has_many.len(), 1);
    assert_eq!(rels.belongs_to_many.len(), 1);
}

#[test]
fn test_detect_relationships_skips_duplicate_accessor_in_bucket() {
    let mut post = post_entity();
    post.relations
        .push(assoc(AssociationKind::BelongsTo, "user", "User"));
    let registry = full_registry();

    let rels = detect_relationships(&post, &registry, &default_display_candidates());
    assert_eq!(rels.belongs_to.len(), 1);
}

#[test]
fn test_default_belongs_to_foreign_key_from_accessor() {
    let mut order = entity(
        "Order",
        "orders",
        &[("id", "bigint"), ("user_id", "bigint")],
    );
    order
        .relations
        .push(assoc(AssociationKind::BelongsTo, "user", "User"));
    let registry = ModelRegistry::from_entities(vec![order.clone(), user_entity()]);

    let rels = detect_relationships(&order, &registry, &default_display_candidates());
    assert_eq!(rels.belongs_to[0].foreign_key, "user_id");
}

#[test]
fn test_map_foreign_keys_projects_belongs_to_only() {
    let rels = RelationshipSet {
        belongs_to: vec![
            BelongsToRel {
                method: "user".into(),
                foreign_key: "user_id".into(),
                related_model: "User".into(),
                related_source: "models/user.yaml".into(),
                related_table: "users".into(),
                display_field: "name".into(),
            },
            BelongsToRel {
                method: "category".into(),
                foreign_key: "category_id".into(),
                related_model: "Category".into(),
                related_source: "models/category.yaml".into(),
                related_table: "categories".into(),
                display_field: "title".into(),
            },
        ],
        has_many: vec![HasManyRel {
            method: "comments".into(),
            related_model: "Comment".into(),
            foreign_key: "post_id".into(),
        }],
        belongs_to_many: vec![BelongsToManyRel {
            method: "tags".into(),
            related_model: "Tag".into(),
            pivot_table: "post_tag".into(),
        }],
    };

    let map = map_foreign_keys(&rels);
    assert_eq!(map.len(), 2);
    assert_eq!(map["user_id"].method, "user");
    assert_eq!(map["category_id"].method, "category");
    assert!(!map.contains_key("post_id"));
}

#[test]
fn test_map_foreign_keys_collision_last_wins() {
    let make = |method: &str| BelongsToRel {
        method: method.into(),
        foreign_key: "owner_id".into(),
        related_model: "User".into(),
        related_source: "models/user.yaml".into(),
        related_table: "users".into(),
        display_field: "name".into(),
    };
    let rels = RelationshipSet {
        belongs_to: vec![make("owner"), make("author")],
        ..Default::default()
    };
    let map = map_foreign_keys(&rels);
    assert_eq!(map.len(), 1);
    assert_eq!(map["owner_id"].method, "author");
}

#[test]
fn test_synthesize_plain_scalar_fields() {
    let registry = full_registry();
    let post = registry.get("Post").unwrap();
    let fields = synthesize_field_configs(
        post,
        &["title".into(), "body".into()],
        &Default::default(),
        &registry,
    );

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "title");
    assert_eq!(fields[0].label, "Title");
    assert_eq!(fields[0].db_type, "string");
    assert_eq!(fields[0].input_type, InputKind::Text);
    assert_eq!(fields[0].ts_type, TsType::String);
    assert!(fields[0].required);
    assert_eq!(fields[0].validation, "required|string|max:255");
    assert!(!fields[0].is_relationship);

    assert_eq!(fields[1].input_type, InputKind::Textarea);
    assert_eq!(fields[1].validation, "nullable|string");
}

#[test]
fn test_synthesize_foreign_key_override() {
    let registry = full_registry();
    let post = registry.get("Post").unwrap();
    let rels = detect_relationships(post, &registry, &default_display_candidates());
    let fk_map = map_foreign_keys(&rels);

    let fields =
        synthesize_field_configs(post, &["title".into(), "user_id".into()], &fk_map, &registry);

    let user_id = &fields[1];
    assert!(user_id.is_relationship);
    assert_eq!(user_id.input_type, InputKind::RelationshipSelect);
    // Label comes from the accessor, not the raw column name.
    assert_eq!(user_id.label, "User");
    assert_eq!(user_id.validation, "required|exists:users,id");
    assert_eq!(user_id.relationship_type.as_deref(), Some("belongsTo"));
    assert_eq!(user_id.relationship_method.as_deref(), Some("user"));
    assert_eq!(user_id.related_table.as_deref(), Some("users"));
    assert_eq!(user_id.display_field.as_deref(), Some("name"));
    assert_eq!(
        user_id.related_columns.as_deref(),
        Some(&["id".to_string(), "name".to_string(), "email".to_string()][..])
    );
}

#[test]
fn test_synthesize_empty_input_yields_empty_output() {
    let registry = full_registry();
    let post = registry.get("Post").unwrap();
    let fields = synthesize_field_configs(post, &[], &Default::default(), &registry);
    assert!(fields.is_empty());
}

#[test]
fn test_field_config_serializes_camel_case() {
    let registry = full_registry();
    let post = registry.get("Post").unwrap();
    let fields = synthesize_field_configs(post, &["title".into()], &Default::default(), &registry);
    let json = serde_json::to_value(&fields[0]).unwrap();
    assert_eq!(json["inputType"], "text");
    assert_eq!(json["tsType"], "string");
    assert_eq!(json["isRelationship"], false);
    // Relationship keys are omitted for scalar fields.
    assert!(json.get("relationshipType").is_none());
}

#[test]
fn test_apply_overrides_replaces_values() {
    let registry = full_registry();
    let post = registry.get("Post").unwrap();
    let mut fields =
        synthesize_field_configs(post, &["title".into()], &Default::default(), &registry);

    let overrides: Vec<FieldOverride> = serde_json::from_str(
        r#"[{"name": "title", "label": "Headline", "required": false, "validation": "nullable|string|max:120"}]"#,
    )
    .unwrap();
    apply_overrides(&mut fields, &overrides);

    assert_eq!(fields[0].label, "Headline");
    assert!(!fields[0].required);
    assert_eq!(fields[0].validation, "nullable|string|max:120");
    // Untouched values keep the detected configuration.
    assert_eq!(fields[0].input_type, InputKind::Text);
}

#[test]
fn test_apply_overrides_backfills_relationship_data() {
    let registry = full_registry();
    let post = registry.get("Post").unwrap();
    let rels = detect_relationships(post, &registry, &default_display_candidates());
    let fk_map = map_foreign_keys(&rels);
    let mut fields = synthesize_field_configs(post, &["user_id".into()], &fk_map, &registry);

    // The override marks the field a relationship but carries no
    // relationship data; detection backfills it.
    let overrides: Vec<FieldOverride> =
        serde_json::from_str(r#"[{"name": "user_id", "inputType": "relationship-select", "label": "Author"}]"#)
            .unwrap();
    apply_overrides(&mut fields, &overrides);

    let field = &fields[0];
    assert_eq!(field.label, "Author");
    assert!(field.is_relationship);
    assert_eq!(field.relationship_method.as_deref(), Some("user"));
    assert_eq!(field.related_model.as_deref(), Some("User"));
    assert_eq!(field.display_field.as_deref(), Some("name"));
}

#[test]
fn test_apply_overrides_can_demote_a_relationship() {
    let registry = full_registry();
    let post = registry.get("Post").unwrap();
    let rels = detect_relationships(post, &registry, &default_display_candidates());
    let fk_map = map_foreign_keys(&rels);
    let mut fields = synthesize_field_configs(post, &["user_id".into()], &fk_map, &registry);

    let overrides: Vec<FieldOverride> = serde_json::from_str(
        r#"[{"name": "user_id", "isRelationship": false, "inputType": "number"}]"#,
    )
    .unwrap();
    apply_overrides(&mut fields, &overrides);

    let field = &fields[0];
    assert!(!field.is_relationship);
    assert_eq!(field.input_type, InputKind::Number);
    assert!(field.relationship_method.is_none());
    assert!(field.related_columns.is_none());
}

#[test]
fn test_apply_overrides_ignores_unmatched_names() {
    let registry = full_registry();
    let post = registry.get("Post").unwrap();
    let mut fields =
        synthesize_field_configs(post, &["title".into()], &Default::default(), &registry);
    let before = fields.clone();

    let overrides: Vec<FieldOverride> =
        serde_json::from_str(r#"[{"name": "nonexistent", "label": "Nope"}]"#).unwrap();
    apply_overrides(&mut fields, &overrides);
    assert_eq!(fields, before);
}
