use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default catalog root prefix for new configurations
pub const DEFAULT_CATALOG_ROOT_PREFIX: &str = "MyLib/";

/// How an item's catalog path is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationMode {
    /// First token of the item name
    #[default]
    NamePrefix,
    /// Source folder relative to the library root
    RelativeFolder,
}

impl ClassificationMode {
    /// Stable key used in plan fingerprints
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationMode::NamePrefix => "NAME_PREFIX",
            ClassificationMode::RelativeFolder => "RELATIVE_FOLDER",
        }
    }
}

/// Delimiter used to cut the prefix off an item name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixDelimiter {
    #[default]
    Underscore,
    Dash,
    /// Any run of whitespace
    Space,
}

impl PrefixDelimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixDelimiter::Underscore => "UNDERSCORE",
            PrefixDelimiter::Dash => "DASH",
            PrefixDelimiter::Space => "SPACE",
        }
    }
}

/// Which item kinds take part in planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TargetType {
    #[default]
    All,
    Materials,
    NodeGroups,
    ObjectsCollections,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::All => "ALL",
            TargetType::Materials => "MATERIALS",
            TargetType::NodeGroups => "NODE_GROUPS",
            TargetType::ObjectsCollections => "OBJECTS_COLLECTIONS",
        }
    }
}

/// An asset library registered by name, selectable by its derived id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredLibrary {
    /// Display name; the folder name is used when empty
    #[serde(default)]
    pub name: String,
    pub path: PathBuf,
}

/// Settings that drive planning and applying.
///
/// Every field takes part in the plan fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogerConfig {
    /// Id of a registered library (`LIB_...`); `None` selects the manual folder
    pub asset_library: Option<String>,

    /// Manual asset library root folder
    pub asset_library_root_folder: Option<PathBuf>,

    /// Libraries available for selection via `asset_library`
    pub registered_libraries: Vec<RegisteredLibrary>,

    pub classification_mode: ClassificationMode,

    pub prefix_delimiter: PrefixDelimiter,

    /// Prepended to every computed catalog path
    pub catalog_root_prefix: String,

    pub target_type: TargetType,

    /// Mark non-asset items as assets during apply when they support it
    pub auto_mark_missing_as_assets: bool,
}

impl Default for CatalogerConfig {
    fn default() -> Self {
        Self {
            asset_library: None,
            asset_library_root_folder: None,
            registered_libraries: Vec::new(),
            classification_mode: ClassificationMode::default(),
            prefix_delimiter: PrefixDelimiter::default(),
            catalog_root_prefix: DEFAULT_CATALOG_ROOT_PREFIX.to_string(),
            target_type: TargetType::default(),
            auto_mark_missing_as_assets: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CatalogerConfig::default();
        assert_eq!(config.classification_mode, ClassificationMode::NamePrefix);
        assert_eq!(config.prefix_delimiter, PrefixDelimiter::Underscore);
        assert_eq!(config.catalog_root_prefix, "MyLib/");
        assert_eq!(config.target_type, TargetType::All);
        assert!(!config.auto_mark_missing_as_assets);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "classification_mode: relative-folder\ntarget_type: node-groups\n";
        let config: CatalogerConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.classification_mode, ClassificationMode::RelativeFolder);
        assert_eq!(config.target_type, TargetType::NodeGroups);
        assert_eq!(config.catalog_root_prefix, "MyLib/");
    }
}
