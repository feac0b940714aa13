//! The narrow view of a host item that planning and applying need.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::TargetType;

/// Kind of a classifiable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Material,
    NodeGroup,
    Object,
    Collection,
}

impl ItemKind {
    /// Folder-style segment appended when classifying by project location
    pub fn type_segment(&self) -> &'static str {
        match self {
            ItemKind::Material => "Materials",
            ItemKind::NodeGroup => "Node_Groups",
            ItemKind::Object => "Objects",
            ItemKind::Collection => "Collections",
        }
    }

    /// Whether this kind takes part under the given target type
    pub fn is_targeted_by(&self, target: TargetType) -> bool {
        match target {
            TargetType::All => true,
            TargetType::Materials => *self == ItemKind::Material,
            TargetType::NodeGroups => *self == ItemKind::NodeGroup,
            TargetType::ObjectsCollections => {
                matches!(self, ItemKind::Object | ItemKind::Collection)
            }
        }
    }

    /// Iteration order of kinds when planning
    pub const ORDER: [ItemKind; 4] = [
        ItemKind::Material,
        ItemKind::NodeGroup,
        ItemKind::Object,
        ItemKind::Collection,
    ];
}

/// A classifiable item supplied by the host.
///
/// Marking as an asset is an optional capability: the default
/// [`CatalogItem::mark_as_asset`] reports it as unsupported.
pub trait CatalogItem {
    fn name(&self) -> &str;

    fn kind(&self) -> ItemKind;

    /// Linked from another file rather than owned locally
    fn is_linked(&self) -> bool;

    /// File the item's data comes from, when known
    fn source_file(&self) -> Option<&Path>;

    /// Whether the item currently carries asset data
    fn is_asset(&self) -> bool;

    /// Turn the item into an asset. Returns `false` when unsupported.
    fn mark_as_asset(&mut self) -> bool {
        false
    }

    /// Store the resolved catalog UUID on the item
    fn set_catalog_id(&mut self, catalog_id: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_filter() {
        assert!(ItemKind::Material.is_targeted_by(TargetType::All));
        assert!(ItemKind::Material.is_targeted_by(TargetType::Materials));
        assert!(!ItemKind::Object.is_targeted_by(TargetType::Materials));
        assert!(ItemKind::Collection.is_targeted_by(TargetType::ObjectsCollections));
        assert!(!ItemKind::NodeGroup.is_targeted_by(TargetType::ObjectsCollections));
        assert!(ItemKind::NodeGroup.is_targeted_by(TargetType::NodeGroups));
    }
}
