//! Document assembly and output writing.
//!
//! One synchronous pass over the host scene graph: filter by kind,
//! classify, extract, collect, then serialize the whole document before
//! the filesystem is touched. Exactly one file is written per invocation;
//! a failed pass writes nothing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::scene::{EntityKind, SceneSource};

use super::classify::{classify, ShapeClass};
use super::config::ExportConfig;
use super::extract::Extractor;
use super::record::CanonicalRecord;
use super::{ExportError, ExportResult};

/// Build the ordered canonical document for a scene.
///
/// Record order is the host's enumeration order. Entities whose kind is
/// not camera/light/mesh are dropped before classification; `Unsupported`
/// classifications are dropped after it. Any extraction error aborts the
/// pass: a partial scene description is unsafe for a downstream renderer.
pub fn build_document(source: &dyn SceneSource, config: &ExportConfig) -> ExportResult<Vec<CanonicalRecord>> {
    let resolution_px = source.render_settings().effective_resolution();
    let extractor = Extractor::new(source, config, resolution_px);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for entity in source.entities() {
        if !matches!(
            entity.kind(),
            EntityKind::Camera | EntityKind::Light | EntityKind::Mesh
        ) {
            skipped += 1;
            continue;
        }

        let class = classify(entity);
        if class == ShapeClass::Unsupported {
            log::debug!("skipping unsupported entity '{}'", entity.name);
            skipped += 1;
            continue;
        }

        if let Some(record) = extractor.extract(entity, class)? {
            records.push(record);
        }
    }

    log::info!(
        "scene '{}': {} records extracted, {} entities skipped",
        source.name(),
        records.len(),
        skipped
    );

    Ok(records)
}

/// Output locations for a scene, in preference order.
///
/// Returns the project-relative path (if the scene has a project
/// directory) and the platform temp-dir fallback. Filename pattern is
/// `<scene_name>_scene.json`; with `ascii_subdir` the preferred path
/// nests under an `ASCII/` directory that is a sibling of the project
/// directory.
pub fn output_candidates(
    project_dir: Option<&Path>,
    scene_name: &str,
    config: &ExportConfig,
) -> (Option<PathBuf>, PathBuf) {
    let filename = format!("{}_scene.json", scene_name);

    let preferred = project_dir.map(|dir| {
        if config.ascii_subdir {
            dir.join("..").join("ASCII").join(&filename)
        } else {
            dir.join(&filename)
        }
    });

    (preferred, std::env::temp_dir().join(filename))
}

/// Extract the scene and write the canonical JSON document.
///
/// Prefers the project directory, falling back to the platform temp
/// directory if the preferred write fails; if both fail the pass errors
/// with [`ExportError::UnwritablePath`]. The resolved path is logged, not
/// returned.
pub fn export_scene(source: &dyn SceneSource, config: &ExportConfig) -> ExportResult<()> {
    let records = build_document(source, config)?;
    let json = serde_json::to_string_pretty(&records)?;

    let project_dir = source.project_dir();
    let (preferred, fallback) = output_candidates(project_dir.as_deref(), source.name(), config);

    if let Some(path) = &preferred {
        if config.ascii_subdir {
            if let Some(parent) = path.parent() {
                // Missing ASCII/ directory is created, an unwritable one
                // falls through to the temp dir like any other IO error
                let _ = fs::create_dir_all(parent);
            }
        }
        match fs::write(path, &json) {
            Ok(()) => {
                log::info!("wrote {} records to {}", records.len(), path.display());
                return Ok(());
            }
            Err(err) => {
                log::warn!(
                    "preferred output path {} not writable ({}), falling back to temp dir",
                    path.display(),
                    err
                );
            }
        }
    }

    match fs::write(&fallback, &json) {
        Ok(()) => {
            log::info!("wrote {} records to {}", records.len(), fallback.display());
            Ok(())
        }
        Err(_) => Err(ExportError::UnwritablePath { preferred, fallback }),
    }
}
