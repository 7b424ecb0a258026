use anyhow::Context;
use minijinja::Environment;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::inflect;
use crate::introspect::{FieldConfig, RelationshipSet};

/// Template names resolvable against the override directory
///
/// Every name here has an embedded default; a file with the same name in
/// `templates_dir` replaces it.
pub const TEMPLATE_NAMES: [&str; 7] = [
    "controller.php.j2",
    "form-request.php.j2",
    "types.ts.j2",
    "index-page.tsx.j2",
    "form-dialog.tsx.j2",
    "columns.tsx.j2",
    "data-table.tsx.j2",
];

const CONTROLLER: &str = include_str!("../../templates/controller.php.j2");
const FORM_REQUEST: &str = include_str!("../../templates/form-request.php.j2");
const TYPES: &str = include_str!("../../templates/types.ts.j2");
const INDEX_PAGE: &str = include_str!("../../templates/index-page.tsx.j2");
const FORM_DIALOG: &str = include_str!("../../templates/form-dialog.tsx.j2");
const COLUMNS: &str = include_str!("../../templates/columns.tsx.j2");
const DATA_TABLE: &str = include_str!("../../templates/data-table.tsx.j2");

/// Select-option props derived from a belongs-to relationship
///
/// Precomputed once so templates do not repeat casing logic.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BelongsToProp {
    pub method: String,
    pub related_model: String,
    pub related_model_camel: String,
    /// Prop name carrying the select options (camel plural, e.g. `users`)
    pub related_model_plural: String,
    pub display_field: String,
}

/// Count-column props derived from a has-many relationship
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HasManyProp {
    pub method: String,
    pub header: String,
}

/// Everything the templates can see
///
/// Top-level keys are snake_case; field and relationship records keep the
/// camelCase wire shape of [`FieldConfig`].
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub model: String,
    pub model_studly: String,
    pub model_camel: String,
    pub model_plural: String,
    pub model_plural_studly: String,
    pub model_title: String,
    pub model_plural_title: String,
    /// Resource route name (kebab plural)
    pub route_name: String,
    pub table: String,
    /// Writable fields, after override merge
    pub fields: Vec<FieldConfig>,
    /// Every column, for type declarations
    pub column_fields: Vec<FieldConfig>,
    /// Columns shown in the data table (secrets and soft-delete stamps removed)
    pub visible_column_fields: Vec<FieldConfig>,
    pub relationships: RelationshipSet,
    pub has_belongs_to: bool,
    pub has_has_many: bool,
    pub belongs_to_props: Vec<BelongsToProp>,
    pub has_many_props: Vec<HasManyProp>,
    /// Comma-joined quoted accessor list for eager loading, or empty
    pub eager_load: String,
    /// Comma-joined quoted accessor list for count loading, or empty
    pub with_count: String,
    /// `Store`/`Update` while rendering form requests; empty elsewhere
    pub request_type: String,
}

/// Build the template environment
///
/// Embedded templates are always registered; files in `templates_dir`
/// matching [`TEMPLATE_NAMES`] override them, the same precedence published
/// stubs have over packaged ones.
pub fn environment(templates_dir: Option<&Path>) -> anyhow::Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_filter("studly", |s: String| inflect::studly(&s));
    env.add_filter("camel", |s: String| inflect::camel(&s));
    env.add_filter("snake", |s: String| inflect::snake(&s));
    env.add_filter("kebab", |s: String| inflect::kebab(&s));
    env.add_filter("plural", |s: String| inflect::plural(&s));
    env.add_filter("title", |s: String| inflect::title(&s));
    // "required|string" → "'required', 'string'"
    env.add_filter("rule_array", |s: String| {
        s.split('|')
            .map(|part| format!("'{part}'"))
            .collect::<Vec<_>>()
            .join(", ")
    });

    let defaults = [
        ("controller.php.j2", CONTROLLER),
        ("form-request.php.j2", FORM_REQUEST),
        ("types.ts.j2", TYPES),
        ("index-page.tsx.j2", INDEX_PAGE),
        ("form-dialog.tsx.j2", FORM_DIALOG),
        ("columns.tsx.j2", COLUMNS),
        ("data-table.tsx.j2", DATA_TABLE),
    ];
    for (name, source) in defaults {
        env.add_template(name, source)?;
    }

    if let Some(dir) = templates_dir {
        for name in TEMPLATE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                let contents = fs::read_to_string(&path).with_context(|| {
                    format!("Failed to read template override: {}", path.display())
                })?;
                env.add_template_owned(name.to_string(), contents)?;
            }
        }
    }

    Ok(env)
}

/// Render one template to a file, skipping existing files unless forced
///
/// Returns whether the file was written.
pub fn render_to(
    env: &Environment<'_>,
    template: &str,
    path: &Path,
    ctx: &RenderContext,
    force: bool,
    label: &str,
) -> anyhow::Result<bool> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing {label}: {path:?}");
        return Ok(false);
    }
    let rendered = env
        .get_template(template)?
        .render(ctx)
        .with_context(|| format!("Failed to render {template}"))?;
    fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✅ Generated {label}: {path:?}");
    Ok(true)
}
