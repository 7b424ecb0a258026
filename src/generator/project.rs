use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::templates::{
    environment, render_to, BelongsToProp, HasManyProp, RenderContext,
};
use crate::config::GeneratorConfig;
use crate::error::Error;
use crate::inflect;
use crate::introspect::{
    apply_overrides, detect_relationships, map_foreign_keys, synthesize_field_configs,
    FieldConfig, FieldOverride, RelationshipSet,
};
use crate::model::{EntityDef, ModelRegistry};

/// The fully resolved configuration for one model, ready for emission
/// or for serving to an interactive caller as JSON
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub model: String,
    pub model_studly: String,
    pub table: String,
    pub fields: Vec<FieldConfig>,
    pub relationships: RelationshipSet,
}

/// Knobs for a single generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub model: String,
    pub force: bool,
    /// Also emit dedicated Store/Update form-request classes
    pub with_requests: bool,
    pub overrides: Option<Vec<FieldOverride>>,
}

/// Resolve a model name into its emission-ready configuration
///
/// Pipeline: registry lookup, relationship detection, foreign-key mapping,
/// field synthesis over the writable columns, then override merge.
pub fn build_model_config(
    model: &str,
    registry: &ModelRegistry,
    config: &GeneratorConfig,
    overrides: Option<&[FieldOverride]>,
) -> Result<ModelConfig, Error> {
    let entity = registry.get(model)?;
    let relationships = detect_relationships(entity, registry, &config.display_field_candidates);
    let fk_map = map_foreign_keys(&relationships);
    let schema = entity.schema();
    let mut fields = synthesize_field_configs(entity, &schema.fillable, &fk_map, registry);
    if let Some(overrides) = overrides {
        apply_overrides(&mut fields, overrides);
    }
    Ok(ModelConfig {
        model: entity.model.clone(),
        model_studly: inflect::studly(&entity.model),
        table: entity.table.clone(),
        fields,
        relationships,
    })
}

// Never rendered as table columns or form inputs.
const HIDDEN_COLUMNS: [&str; 3] = ["password", "remember_token", "deleted_at"];

fn build_render_context(
    entity: &EntityDef,
    mc: &ModelConfig,
    registry: &ModelRegistry,
    overrides: Option<&[FieldOverride]>,
) -> RenderContext {
    let fk_map = map_foreign_keys(&mc.relationships);
    let all_columns = entity.column_names();
    let mut column_fields = synthesize_field_configs(entity, &all_columns, &fk_map, registry);
    if let Some(overrides) = overrides {
        apply_overrides(&mut column_fields, overrides);
    }
    let visible_column_fields: Vec<FieldConfig> = column_fields
        .iter()
        .filter(|f| !HIDDEN_COLUMNS.contains(&f.name.as_str()))
        .cloned()
        .collect();

    let model_snake = inflect::snake(&mc.model_studly);
    let model_plural = inflect::plural(&model_snake);
    let model_title = inflect::title(&model_snake);

    let belongs_to_props: Vec<BelongsToProp> = mc
        .relationships
        .belongs_to
        .iter()
        .map(|rel| BelongsToProp {
            method: rel.method.clone(),
            related_model: rel.related_model.clone(),
            related_model_camel: inflect::camel(&rel.related_model),
            related_model_plural: inflect::plural(&inflect::camel(&rel.related_model)),
            display_field: rel.display_field.clone(),
        })
        .collect();
    let has_many_props: Vec<HasManyProp> = mc
        .relationships
        .has_many
        .iter()
        .map(|rel| HasManyProp {
            method: rel.method.clone(),
            header: inflect::plural_title(&inflect::title(&inflect::snake(&rel.related_model))),
        })
        .collect();

    let quoted = |methods: Vec<&str>| {
        methods
            .iter()
            .map(|m| format!("'{m}'"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let eager_load = quoted(
        mc.relationships
            .belongs_to
            .iter()
            .map(|r| r.method.as_str())
            .collect(),
    );
    let with_count = quoted(
        mc.relationships
            .has_many
            .iter()
            .map(|r| r.method.as_str())
            .collect(),
    );

    RenderContext {
        model: mc.model.clone(),
        model_studly: mc.model_studly.clone(),
        model_camel: inflect::camel(&mc.model_studly),
        model_plural: model_plural.clone(),
        model_plural_studly: inflect::studly(&model_plural),
        model_title,
        model_plural_title: inflect::plural_title(&inflect::title(&model_snake)),
        route_name: inflect::plural(&inflect::kebab(&mc.model_studly)),
        table: mc.table.clone(),
        fields: mc.fields.clone(),
        column_fields,
        visible_column_fields,
        relationships: mc.relationships.clone(),
        has_belongs_to: !mc.relationships.belongs_to.is_empty(),
        has_has_many: !mc.relationships.has_many.is_empty(),
        belongs_to_props,
        has_many_props,
        eager_load,
        with_count,
        request_type: String::new(),
    }
}

/// Emit the full CRUD slice for one model under `root`
///
/// Writes the controller, the TypeScript interface file, and the four React
/// page files; with `with_requests`, also a Store and an Update form-request
/// class. Existing files are left alone unless `force` is set. Returns the
/// paths that were actually written.
pub fn generate_crud(
    root: &Path,
    config: &GeneratorConfig,
    registry: &ModelRegistry,
    opts: &GenerateOptions,
) -> anyhow::Result<Vec<PathBuf>> {
    let mc = build_model_config(
        &opts.model,
        registry,
        config,
        opts.overrides.as_deref(),
    )?;
    let entity = registry.get(&opts.model)?;
    let ctx = build_render_context(entity, &mc, registry, opts.overrides.as_deref());
    let env = environment(config.templates_dir.as_deref())?;

    let mut written = Vec::new();
    let emit = |template: &str,
                    path: PathBuf,
                    ctx: &RenderContext,
                    label: &str,
                    written: &mut Vec<PathBuf>|
     -> anyhow::Result<()> {
        if render_to(&env, template, &path, ctx, opts.force, label)? {
            written.push(path);
        }
        Ok(())
    };

    let controller_dir = root.join(&config.paths.controllers);
    fs::create_dir_all(&controller_dir)
        .with_context(|| format!("Failed to create {}", controller_dir.display()))?;
    emit(
        "controller.php.j2",
        controller_dir.join(format!("{}Controller.php", ctx.model_studly)),
        &ctx,
        "controller",
        &mut written,
    )?;

    if opts.with_requests {
        let request_dir = root.join(&config.paths.requests).join(&ctx.model_studly);
        fs::create_dir_all(&request_dir)
            .with_context(|| format!("Failed to create {}", request_dir.display()))?;
        for request_type in ["Store", "Update"] {
            let mut request_ctx = ctx.clone();
            request_ctx.request_type = request_type.to_string();
            emit(
                "form-request.php.j2",
                request_dir.join(format!("{request_type}{}Request.php", ctx.model_studly)),
                &request_ctx,
                "form request",
                &mut written,
            )?;
        }
    }

    let types_dir = root.join(&config.paths.types);
    fs::create_dir_all(&types_dir)
        .with_context(|| format!("Failed to create {}", types_dir.display()))?;
    emit(
        "types.ts.j2",
        types_dir.join(format!("{}.ts", ctx.model_camel)),
        &ctx,
        "types",
        &mut written,
    )?;

    let pages_dir = root.join(&config.paths.pages).join(&ctx.model_plural_studly);
    fs::create_dir_all(&pages_dir)
        .with_context(|| format!("Failed to create {}", pages_dir.display()))?;
    let pages = [
        ("index-page.tsx.j2", "Index.tsx", "index page"),
        ("form-dialog.tsx.j2", "FormDialog.tsx", "form dialog"),
        ("columns.tsx.j2", "columns.tsx", "columns"),
        ("data-table.tsx.j2", "DataTable.tsx", "data table"),
    ];
    for (template, file, label) in pages {
        emit(template, pages_dir.join(file), &ctx, label, &mut written)?;
    }

    Ok(written)
}
