//! Plan fingerprints for the preview/apply staleness check

use sha2::{Digest, Sha256};

use super::AssignmentPlan;
use crate::config::CatalogerConfig;

/// Marker written in place of a registered library id when none is selected
const MANUAL_SELECTION: &str = "__MANUAL__";

/// Hash every option that influences the plan, then every planned pair.
///
/// Two plans share a signature only when the resolved root, the options and
/// the ordered (item name, catalog path) pairs are all the same.
pub fn plan_signature(config: &CatalogerConfig, plan: &AssignmentPlan) -> String {
    let root_folder = config
        .asset_library_root_folder
        .as_deref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    let fields = [
        plan.library_root.path.to_string_lossy().into_owned(),
        config
            .asset_library
            .clone()
            .unwrap_or_else(|| MANUAL_SELECTION.to_string()),
        root_folder,
        config.classification_mode.as_str().to_string(),
        config.prefix_delimiter.as_str().to_string(),
        config.catalog_root_prefix.clone(),
        config.target_type.as_str().to_string(),
        u8::from(config.auto_mark_missing_as_assets).to_string(),
    ];
    for field in &fields {
        hasher.update(field.as_bytes());
        hasher.update([0u8]);
    }
    for item in &plan.items {
        hasher.update(item.item_name.as_bytes());
        hasher.update([0u8]);
        hasher.update(item.catalog_path.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LibraryRoot, PrefixDelimiter, RootSource};
    use crate::planner::PlanItem;
    use std::path::PathBuf;

    fn plan(pairs: &[(&str, &str)]) -> AssignmentPlan {
        AssignmentPlan {
            library_root: LibraryRoot {
                path: PathBuf::from("/lib"),
                source: RootSource::Manual,
            },
            items: pairs
                .iter()
                .enumerate()
                .map(|(index, (name, path))| PlanItem {
                    index,
                    item_name: name.to_string(),
                    catalog_path: path.to_string(),
                })
                .collect(),
            skipped_linked: 0,
            skipped_external: 0,
        }
    }

    #[test]
    fn test_signature_is_stable() {
        let config = CatalogerConfig::default();
        let a = plan_signature(&config, &plan(&[("Chair", "MyLib/Chair")]));
        let b = plan_signature(&config, &plan(&[("Chair", "MyLib/Chair")]));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_signature_tracks_options_and_pairs() {
        let config = CatalogerConfig::default();
        let base = plan_signature(&config, &plan(&[("Chair", "MyLib/Chair")]));

        let changed = CatalogerConfig {
            prefix_delimiter: PrefixDelimiter::Dash,
            ..config.clone()
        };
        assert_ne!(base, plan_signature(&changed, &plan(&[("Chair", "MyLib/Chair")])));

        let marked = CatalogerConfig {
            auto_mark_missing_as_assets: true,
            ..config.clone()
        };
        assert_ne!(base, plan_signature(&marked, &plan(&[("Chair", "MyLib/Chair")])));

        assert_ne!(base, plan_signature(&config, &plan(&[("Chair", "MyLib/Seat")])));
        assert_ne!(
            base,
            plan_signature(&config, &plan(&[("Chair", "MyLib/Chair"), ("Lamp", "MyLib/Lamp")]))
        );
    }

    #[test]
    fn test_separator_prevents_concatenation_collisions() {
        let config = CatalogerConfig::default();
        assert_ne!(
            plan_signature(&config, &plan(&[("ab", "c")])),
            plan_signature(&config, &plan(&[("a", "bc")]))
        );
    }
}
