//! Classification planning
//!
//! Computes a target catalog path for every participating item from the
//! configuration alone. Nothing here touches items or the catalog file; the
//! resulting [`AssignmentPlan`] refers back to items by index.

mod fingerprint;
mod item;

pub use fingerprint::plan_signature;
pub use item::{CatalogItem, ItemKind};

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::catalog::{compose_catalog_path, safe_segment};
use crate::config::{
    require_library_root, CatalogerConfig, ClassificationMode, LibraryRoot, PrefixDelimiter,
};
use crate::io::PathUtils;
use crate::Result;

/// One item and the catalog path it will be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanItem {
    /// Position of the item in the slice given to [`build_plan`]
    pub index: usize,
    pub item_name: String,
    pub catalog_path: String,
}

/// Planned assignments plus the items left out and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentPlan {
    pub library_root: LibraryRoot,
    pub items: Vec<PlanItem>,
    /// Items owned by another file
    pub skipped_linked: usize,
    /// Items without a source directory inside the library root
    pub skipped_external: usize,
}

impl AssignmentPlan {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct catalog paths, sorted
    pub fn catalog_paths(&self) -> Vec<String> {
        self.catalog_counts().into_keys().collect()
    }

    /// Number of planned items per catalog path
    pub fn catalog_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.catalog_path.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Build the assignment plan for `items`.
///
/// Fails only when no library root can be resolved.
pub fn build_plan<I: CatalogItem>(
    config: &CatalogerConfig,
    project_file: Option<&Path>,
    items: &[I],
) -> Result<AssignmentPlan> {
    let library_root = require_library_root(config, project_file)?;

    let mut planned = Vec::new();
    let mut skipped_linked = 0;
    let mut skipped_external = 0;

    for kind in ItemKind::ORDER {
        if !kind.is_targeted_by(config.target_type) {
            continue;
        }
        for (index, item) in items.iter().enumerate().filter(|(_, i)| i.kind() == kind) {
            if item.is_linked() {
                skipped_linked += 1;
                continue;
            }

            let tail = match config.classification_mode {
                ClassificationMode::NamePrefix => {
                    prefix_from_name(item.name(), config.prefix_delimiter)
                }
                ClassificationMode::RelativeFolder => {
                    match relative_folder_tail(item, project_file, &library_root.path) {
                        Some(tail) => tail,
                        None => {
                            debug!("Skipping {}: outside library root", item.name());
                            skipped_external += 1;
                            continue;
                        }
                    }
                }
            };

            let catalog_path = compose_catalog_path(&config.catalog_root_prefix, &tail);
            debug!("Planned {} -> {}", item.name(), catalog_path);
            planned.push(PlanItem {
                index,
                item_name: item.name().to_string(),
                catalog_path,
            });
        }
    }

    Ok(AssignmentPlan {
        library_root,
        items: planned,
        skipped_linked,
        skipped_external,
    })
}

/// First token of `name` under the delimiter, sanitized
pub fn prefix_from_name(name: &str, delimiter: PrefixDelimiter) -> String {
    let head = match delimiter {
        PrefixDelimiter::Underscore => name.split('_').next(),
        PrefixDelimiter::Dash => name.split('-').next(),
        PrefixDelimiter::Space => name.split_whitespace().next(),
    };
    safe_segment(head.unwrap_or(name))
}

/// Directory an item is classified by, and whether it came from the
/// project-file fallback rather than the item's own source file.
fn source_dir<I: CatalogItem>(item: &I, project_file: Option<&Path>) -> Option<(PathBuf, bool)> {
    if let Some(source) = item.source_file() {
        if let Some(dir) = PathUtils::absolute(source).parent() {
            return Some((dir.to_path_buf(), false));
        }
    }
    let project = project_file?;
    PathUtils::absolute(project)
        .parent()
        .map(|dir| (dir.to_path_buf(), true))
}

fn relative_folder_tail<I: CatalogItem>(
    item: &I,
    project_file: Option<&Path>,
    library_root: &Path,
) -> Option<String> {
    let (dir, from_project) = source_dir(item, project_file)?;
    let relative = PathUtils::relative_to(&dir, library_root)?;

    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(safe_segment(&part.to_string_lossy())),
            _ => None,
        })
        .collect();
    if from_project {
        segments.push(safe_segment(item.kind().type_segment()));
    }
    Some(segments.join("/"))
}
