//! Test helper functions for integration tests
//!
//! Shared across test files using the tests/common/ pattern.

use auto_cataloger::items::{ItemManifest, ManifestItem};
use auto_cataloger::planner::ItemKind;
use std::path::Path;
use std::sync::Once;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

#[allow(dead_code)]
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// A locally owned asset item with no source file
#[allow(dead_code)]
pub fn asset(name: &str, kind: ItemKind) -> ManifestItem {
    ManifestItem {
        name: name.to_string(),
        kind,
        linked: false,
        source_file: None,
        is_asset: true,
        markable: false,
        catalog_id: None,
    }
}

/// An asset item whose data comes from `source_file`
#[allow(dead_code)]
pub fn asset_from(name: &str, kind: ItemKind, source_file: &Path) -> ManifestItem {
    ManifestItem {
        source_file: Some(source_file.to_path_buf()),
        ..asset(name, kind)
    }
}

/// Write a manifest to `path` and return it
#[allow(dead_code)]
pub fn write_manifest(
    path: &Path,
    project_file: Option<&Path>,
    items: Vec<ManifestItem>,
) -> ItemManifest {
    let manifest = ItemManifest {
        project_file: project_file.map(Path::to_path_buf),
        items,
    };
    manifest.save(path).unwrap();
    manifest
}
