//! Project wiring
//!
//! Inserts generated resources into the host project's route and navigation
//! files. Both files carry a marker comment; new lines are inserted directly
//! above it, so repeated runs keep insertion order stable. Every operation
//! here is idempotent: a line that is already present is never added twice.

use anyhow::Context;
use std::fs;
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::inflect;

/// Result of one wiring attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiringOutcome {
    /// Whether the target file was modified
    pub added: bool,
    pub message: String,
}

/// Register the model's resource routes in the routes file
///
/// Appends a `Route::resource` declaration above the marker comment. Returns
/// without touching the file when the declaration is already present, when
/// the routes file does not exist, or when the marker is missing.
pub fn add_crud_routes(
    root: &Path,
    config: &GeneratorConfig,
    model: &str,
) -> anyhow::Result<WiringOutcome> {
    let studly = inflect::studly(model);
    let route_name = inflect::plural(&inflect::kebab(&studly));
    let line = format!(
        "    Route::resource('{route_name}', \\App\\Http\\Controllers\\{studly}Controller::class)->names('{route_name}');"
    );
    insert_before_marker(
        &root.join(&config.routes_file),
        &config.routes_marker,
        &line,
        "routes",
    )
}

/// Register a sidebar entry for the model in the navigation config
///
/// The entry title is the pluralized model title and the route points at the
/// resource index. Same idempotence rules as [`add_crud_routes`].
pub fn add_navigation_item(
    root: &Path,
    config: &GeneratorConfig,
    model: &str,
    icon: &str,
) -> anyhow::Result<WiringOutcome> {
    let studly = inflect::studly(model);
    let route_name = inflect::plural(&inflect::kebab(&studly));
    let title = inflect::plural_title(&inflect::title(&inflect::snake(&studly)));
    let line = format!(
        "        ['title' => '{title}', 'route' => '{route_name}.index', 'icon' => '{icon}', 'enabled' => true],"
    );
    insert_before_marker(
        &root.join(&config.navigation_file),
        &config.navigation_marker,
        &line,
        "navigation",
    )
}

fn insert_before_marker(
    path: &Path,
    marker: &str,
    line: &str,
    label: &str,
) -> anyhow::Result<WiringOutcome> {
    if !path.exists() {
        let message = format!("⚠️  {label} file not found: {}", path.display());
        println!("{message}");
        return Ok(WiringOutcome {
            added: false,
            message,
        });
    }

    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if contents.contains(line) {
        let message = format!("✓ {label} entry already present: {}", path.display());
        println!("{message}");
        return Ok(WiringOutcome {
            added: false,
            message,
        });
    }

    let Some(marker_pos) = contents.find(marker) else {
        let message = format!(
            "⚠️  marker '{marker}' not found in {}; add it to enable wiring",
            path.display()
        );
        println!("{message}");
        return Ok(WiringOutcome {
            added: false,
            message,
        });
    };

    // Insert at the start of the marker's line so its indentation survives.
    let line_start = contents[..marker_pos]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let mut updated = String::with_capacity(contents.len() + line.len() + 1);
    updated.push_str(&contents[..line_start]);
    updated.push_str(line);
    updated.push('\n');
    updated.push_str(&contents[line_start..]);

    fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    let message = format!("✅ Added {label} entry: {}", path.display());
    println!("{message}");
    Ok(WiringOutcome {
        added: true,
        message,
    })
}
