//! JSON item manifests: the CLI's stand-in for a host application's items

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::planner::{CatalogItem, ItemKind};
use crate::{CatalogerError, Result};

/// One item as listed in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestItem {
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub linked: bool,
    #[serde(default)]
    pub source_file: Option<PathBuf>,
    #[serde(default)]
    pub is_asset: bool,
    /// Whether the item may be turned into an asset
    #[serde(default)]
    pub markable: bool,
    #[serde(default)]
    pub catalog_id: Option<String>,
}

impl CatalogItem for ManifestItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ItemKind {
        self.kind
    }

    fn is_linked(&self) -> bool {
        self.linked
    }

    fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    fn is_asset(&self) -> bool {
        self.is_asset
    }

    fn mark_as_asset(&mut self) -> bool {
        if self.markable {
            self.is_asset = true;
        }
        self.markable
    }

    fn set_catalog_id(&mut self, catalog_id: &str) {
        self.catalog_id = Some(catalog_id.to_string());
    }
}

/// A project file and the items it holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemManifest {
    /// Saved location of the project; `None` for an unsaved project
    #[serde(default)]
    pub project_file: Option<PathBuf>,
    #[serde(default)]
    pub items: Vec<ManifestItem>,
}

impl ItemManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| CatalogerError::file("read", path, e))?;
        let manifest: ItemManifest = serde_json::from_str(&content)?;
        debug!(
            "Loaded {} items from {}",
            manifest.items.len(),
            path.display()
        );
        Ok(manifest)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| CatalogerError::file("write", path, e))?;
        Ok(())
    }
}
