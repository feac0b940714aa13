//! Preview/apply workflow
//!
//! A preview records the fingerprint of the plan it showed. An apply rebuilds
//! the plan and refuses to write anything unless its fingerprint still
//! matches; a successful apply returns the state to neutral.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::catalog::ensure_catalogs;
use crate::config::{CatalogerConfig, LibraryRoot};
use crate::planner::{build_plan, plan_signature, CatalogItem};
use crate::state::{PreviewState, PreviewSummary};
use crate::{CatalogerError, Result};

/// Counts reported by a successful apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub library_root: LibraryRoot,
    /// Items that received a catalog id
    pub assigned: usize,
    /// Distinct catalog paths in the plan
    pub catalog_count: usize,
    /// Catalog entries newly written to the index file
    pub created: usize,
    pub skipped_linked: usize,
    pub skipped_external: usize,
    /// Planned items left alone because they are not assets
    pub skipped_non_asset: usize,
    pub auto_marked: usize,
}

/// Runs previews and applies for one project against one configuration
#[derive(Debug, Clone)]
pub struct Coordinator {
    config: CatalogerConfig,
    project_file: Option<PathBuf>,
    state: PreviewState,
}

impl Coordinator {
    pub fn new(config: CatalogerConfig, project_file: Option<PathBuf>) -> Self {
        Self::with_state(config, project_file, PreviewState::default())
    }

    /// Resume from a previously persisted preview state
    pub fn with_state(
        config: CatalogerConfig,
        project_file: Option<PathBuf>,
        state: PreviewState,
    ) -> Self {
        Self {
            config,
            project_file,
            state,
        }
    }

    pub fn config(&self) -> &CatalogerConfig {
        &self.config
    }

    /// Replace the configuration. A recorded preview stays, and goes stale
    /// if the change alters the plan.
    pub fn set_config(&mut self, config: CatalogerConfig) {
        self.config = config;
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// Plan without writing and remember the plan's fingerprint.
    ///
    /// Any earlier preview is forgotten first, so a failed preview leaves
    /// nothing for apply to act on.
    pub fn preview<I: CatalogItem>(&mut self, items: &[I]) -> Result<PreviewSummary> {
        self.state.reset();
        let plan = build_plan(&self.config, self.project_file.as_deref(), items)?;
        let signature = plan_signature(&self.config, &plan);
        let summary = PreviewSummary::from_plan(&plan);

        info!(
            "Previewed {} assignments into {} catalogs under {} ({})",
            summary.total,
            summary.catalog_count,
            summary.library_root.path.display(),
            summary.library_root.source
        );
        self.state.record(signature, summary.clone());
        Ok(summary)
    }

    /// Write missing catalogs and assign every planned item its catalog id
    pub fn apply<I: CatalogItem>(&mut self, items: &mut [I]) -> Result<ApplyReport> {
        let plan = build_plan(&self.config, self.project_file.as_deref(), items)?;
        if !self.state.ready {
            warn!("Apply requested without a preview");
            return Err(CatalogerError::PreviewRequired);
        }

        let signature = plan_signature(&self.config, &plan);
        if !self.state.matches(&signature) {
            warn!("Plan changed since the last preview");
            return Err(CatalogerError::StalePreview);
        }
        if plan.is_empty() {
            return Err(CatalogerError::NothingToAssign);
        }

        let catalog_paths = plan.catalog_paths();
        let outcome = ensure_catalogs(&plan.library_root.path, &catalog_paths)?;

        let mut assigned = 0;
        let mut skipped_non_asset = 0;
        let mut auto_marked = 0;
        for planned in &plan.items {
            let item = &mut items[planned.index];
            if !item.is_asset() && self.config.auto_mark_missing_as_assets && item.mark_as_asset()
            {
                auto_marked += 1;
            }
            if !item.is_asset() {
                skipped_non_asset += 1;
                continue;
            }

            let uuid = outcome
                .uuid_by_path
                .get(&planned.catalog_path)
                .ok_or_else(|| {
                    CatalogerError::State(format!(
                        "Catalog {} missing after ensure",
                        planned.catalog_path
                    ))
                })?;
            item.set_catalog_id(uuid);
            assigned += 1;
        }

        self.state.reset();
        info!(
            "Assigned {} items to {} catalogs ({} created)",
            assigned,
            catalog_paths.len(),
            outcome.created
        );

        Ok(ApplyReport {
            library_root: plan.library_root,
            assigned,
            catalog_count: catalog_paths.len(),
            created: outcome.created,
            skipped_linked: plan.skipped_linked,
            skipped_external: plan.skipped_external,
            skipped_non_asset,
            auto_marked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog_files, CatalogStore};
    use crate::planner::ItemKind;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Debug, Clone)]
    struct FakeItem {
        name: String,
        kind: ItemKind,
        asset: bool,
        markable: bool,
        catalog_id: Option<String>,
    }

    impl FakeItem {
        fn asset(name: &str) -> Self {
            Self {
                name: name.to_string(),
                kind: ItemKind::Object,
                asset: true,
                markable: false,
                catalog_id: None,
            }
        }
    }

    impl CatalogItem for FakeItem {
        fn name(&self) -> &str {
            &self.name
        }
        fn kind(&self) -> ItemKind {
            self.kind
        }
        fn is_linked(&self) -> bool {
            false
        }
        fn source_file(&self) -> Option<&Path> {
            None
        }
        fn is_asset(&self) -> bool {
            self.asset
        }
        fn mark_as_asset(&mut self) -> bool {
            if self.markable {
                self.asset = true;
            }
            self.markable
        }
        fn set_catalog_id(&mut self, catalog_id: &str) {
            self.catalog_id = Some(catalog_id.to_string());
        }
    }

    fn coordinator(root: &Path) -> Coordinator {
        let config = CatalogerConfig {
            asset_library_root_folder: Some(root.to_path_buf()),
            ..CatalogerConfig::default()
        };
        Coordinator::new(config, None)
    }

    #[test]
    fn test_apply_requires_preview() {
        let temp_dir = TempDir::new().unwrap();
        let mut coordinator = coordinator(temp_dir.path());
        let mut items = vec![FakeItem::asset("Chair_Oak")];

        let err = coordinator.apply(&mut items).unwrap_err();
        assert!(matches!(err, CatalogerError::PreviewRequired));
        assert!(!catalog_files(temp_dir.path()).catalog_file.exists());
    }

    #[test]
    fn test_preview_then_apply() {
        let temp_dir = TempDir::new().unwrap();
        let mut coordinator = coordinator(temp_dir.path());
        let mut items = vec![
            FakeItem::asset("Chair_Oak"),
            FakeItem::asset("Chair_Pine"),
            FakeItem::asset("Lamp_Desk"),
        ];

        let summary = coordinator.preview(&items).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.catalog_count, 2);
        assert!(coordinator.state().ready);

        let report = coordinator.apply(&mut items).unwrap();
        assert_eq!(report.assigned, 3);
        assert_eq!(report.catalog_count, 2);
        assert_eq!(report.created, 2);
        assert!(!coordinator.state().ready);

        let store = CatalogStore::load(&catalog_files(temp_dir.path()).catalog_file).unwrap();
        let chair = store.entry("MyLib/Chair").unwrap();
        assert_eq!(items[0].catalog_id.as_deref(), Some(chair.uuid.as_str()));
        assert_eq!(items[0].catalog_id, items[1].catalog_id);
        assert_ne!(items[0].catalog_id, items[2].catalog_id);

        let err = coordinator.apply(&mut items).unwrap_err();
        assert!(matches!(err, CatalogerError::PreviewRequired));
    }

    #[test]
    fn test_changed_options_are_stale() {
        let temp_dir = TempDir::new().unwrap();
        let mut coordinator = coordinator(temp_dir.path());
        let mut items = vec![FakeItem::asset("Chair_Oak")];
        coordinator.preview(&items).unwrap();

        let mut config = coordinator.config().clone();
        config.catalog_root_prefix = "Studio".to_string();
        coordinator.set_config(config);

        let err = coordinator.apply(&mut items).unwrap_err();
        assert!(matches!(err, CatalogerError::StalePreview));
        assert!(coordinator.state().ready);
        assert!(!catalog_files(temp_dir.path()).catalog_file.exists());
        assert!(items[0].catalog_id.is_none());
    }

    #[test]
    fn test_changed_items_are_stale() {
        let temp_dir = TempDir::new().unwrap();
        let mut coordinator = coordinator(temp_dir.path());
        let mut items = vec![FakeItem::asset("Chair_Oak")];
        coordinator.preview(&items).unwrap();

        items.push(FakeItem::asset("Lamp_Desk"));
        assert!(matches!(
            coordinator.apply(&mut items),
            Err(CatalogerError::StalePreview)
        ));
    }

    #[test]
    fn test_failed_preview_clears_earlier_preview() {
        let temp_dir = TempDir::new().unwrap();
        let mut coordinator = coordinator(temp_dir.path());
        let good = coordinator.config().clone();
        let mut items = vec![FakeItem::asset("Chair_Oak")];
        coordinator.preview(&items).unwrap();

        coordinator.set_config(CatalogerConfig::default());
        let err = coordinator.preview(&items).unwrap_err();
        assert!(matches!(err, CatalogerError::Config(_)));
        assert!(!coordinator.state().ready);
        assert_eq!(coordinator.state().signature, None);

        coordinator.set_config(good);
        assert!(matches!(
            coordinator.apply(&mut items),
            Err(CatalogerError::PreviewRequired)
        ));
        assert!(!catalog_files(temp_dir.path()).catalog_file.exists());
    }

    #[test]
    fn test_config_error_reported_before_missing_preview() {
        let mut coordinator = Coordinator::new(CatalogerConfig::default(), None);
        let mut items = vec![FakeItem::asset("Chair_Oak")];
        assert!(matches!(
            coordinator.apply(&mut items),
            Err(CatalogerError::Config(_))
        ));
    }

    #[test]
    fn test_padded_prefix_assigns_written_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let mut coordinator = coordinator(temp_dir.path());
        let mut config = coordinator.config().clone();
        config.catalog_root_prefix = "/ Studio".to_string();
        coordinator.set_config(config);
        let mut items = vec![FakeItem::asset("Chair_Oak")];

        let summary = coordinator.preview(&items).unwrap();
        assert_eq!(summary.rows[0].catalog_path, "Studio/Chair");

        let report = coordinator.apply(&mut items).unwrap();
        assert_eq!(report.assigned, 1);
        let store = CatalogStore::load(&catalog_files(temp_dir.path()).catalog_file).unwrap();
        let entry = store.entry("Studio/Chair").unwrap();
        assert_eq!(items[0].catalog_id.as_deref(), Some(entry.uuid.as_str()));
        assert!(!coordinator.state().ready);
    }

    #[test]
    fn test_empty_plan_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut coordinator = coordinator(temp_dir.path());
        let mut items: Vec<FakeItem> = Vec::new();
        coordinator.preview(&items).unwrap();
        assert!(matches!(
            coordinator.apply(&mut items),
            Err(CatalogerError::NothingToAssign)
        ));
    }

    #[test]
    fn test_non_assets_and_auto_mark() {
        let temp_dir = TempDir::new().unwrap();
        let mut items = vec![
            FakeItem::asset("Chair_Oak"),
            FakeItem {
                asset: false,
                markable: true,
                ..FakeItem::asset("Chair_Pine")
            },
            FakeItem {
                asset: false,
                markable: false,
                ..FakeItem::asset("Chair_Ash")
            },
        ];

        let mut plain = coordinator(temp_dir.path());
        plain.preview(&items).unwrap();
        let report = plain.apply(&mut items.clone()).unwrap();
        assert_eq!(report.assigned, 1);
        assert_eq!(report.skipped_non_asset, 2);
        assert_eq!(report.auto_marked, 0);

        let mut marking = coordinator(temp_dir.path());
        let mut config = marking.config().clone();
        config.auto_mark_missing_as_assets = true;
        marking.set_config(config);
        marking.preview(&items).unwrap();
        let report = marking.apply(&mut items).unwrap();
        assert_eq!(report.assigned, 2);
        assert_eq!(report.skipped_non_asset, 1);
        assert_eq!(report.auto_marked, 1);
        assert_eq!(report.created, 0);
        assert!(items[1].is_asset());
        assert!(items[2].catalog_id.is_none());
    }
}
