//! Asset library root resolution.
//!
//! A root comes from, in order: the selected registered library, the manual
//! root folder, the directory of the project file. The first that applies
//! wins; when none applies the operation cannot run.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};

use super::types::{CatalogerConfig, RegisteredLibrary};
use crate::io::PathUtils;
use crate::{CatalogerError, Result};

/// Prefix of registered library ids
pub const REGISTERED_LIBRARY_PREFIX: &str = "LIB_";

/// Where a resolved library root came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootSource {
    Registered,
    Manual,
    Project,
}

impl RootSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RootSource::Registered => "REGISTERED",
            RootSource::Manual => "MANUAL",
            RootSource::Project => "BLEND",
        }
    }
}

impl fmt::Display for RootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An absolute asset library root and how it was chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRoot {
    pub path: PathBuf,
    pub source: RootSource,
}

/// Stable id for a registered library: `LIB_` + 12 hex chars of the path hash
pub fn library_id_for_path(absolute_path: &Path) -> String {
    let digest = Sha256::digest(absolute_path.to_string_lossy().as_bytes());
    let hex = hex::encode(digest);
    format!("{REGISTERED_LIBRARY_PREFIX}{}", hex[..12].to_uppercase())
}

/// A registered library with its derived id, as offered for selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryChoice {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
}

/// Registered libraries with ids, skipping blank paths and duplicate ids
pub fn library_choices(libraries: &[RegisteredLibrary]) -> Vec<LibraryChoice> {
    let mut choices: Vec<LibraryChoice> = Vec::new();
    for library in libraries {
        if library.path.as_os_str().is_empty() {
            continue;
        }
        let path = PathUtils::absolute(&library.path);
        let id = library_id_for_path(&path);
        if choices.iter().any(|c| c.id == id) {
            continue;
        }
        let name = match library.name.trim() {
            "" => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            trimmed => trimmed.to_string(),
        };
        choices.push(LibraryChoice { id, name, path });
    }
    choices
}

/// Resolve the library root, or `None` when nothing is configured
pub fn resolve_library_root(
    config: &CatalogerConfig,
    project_file: Option<&Path>,
) -> Option<LibraryRoot> {
    if let Some(selected) = config.asset_library.as_deref() {
        if let Some(choice) = library_choices(&config.registered_libraries)
            .into_iter()
            .find(|c| c.id == selected)
        {
            return Some(LibraryRoot {
                path: choice.path,
                source: RootSource::Registered,
            });
        }
        tracing::debug!("Registered library {} not found, falling back", selected);
    }

    if let Some(manual) = config.asset_library_root_folder.as_deref() {
        let manual = manual.to_string_lossy();
        let manual = manual.trim();
        if !manual.is_empty() {
            return Some(LibraryRoot {
                path: PathUtils::absolute(Path::new(manual)),
                source: RootSource::Manual,
            });
        }
    }

    let project_dir = project_file
        .and_then(|file| PathUtils::absolute(file).parent().map(Path::to_path_buf));
    project_dir.map(|path| LibraryRoot {
        path,
        source: RootSource::Project,
    })
}

/// Like [`resolve_library_root`], but a missing root is a configuration error
pub fn require_library_root(
    config: &CatalogerConfig,
    project_file: Option<&Path>,
) -> Result<LibraryRoot> {
    resolve_library_root(config, project_file).ok_or_else(|| {
        CatalogerError::Config(
            "Asset Library Root is empty and current project file is not saved.".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered(name: &str, path: &str) -> RegisteredLibrary {
        RegisteredLibrary {
            name: name.to_string(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_library_id_shape() {
        let id = library_id_for_path(Path::new("/lib/assets"));
        assert!(id.starts_with(REGISTERED_LIBRARY_PREFIX));
        assert_eq!(id.len(), REGISTERED_LIBRARY_PREFIX.len() + 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        assert_eq!(id, library_id_for_path(Path::new("/lib/assets")));
        assert_ne!(id, library_id_for_path(Path::new("/lib/other")));
    }

    #[cfg(unix)]
    #[test]
    fn test_library_choices_dedupes_and_names() {
        let choices = library_choices(&[
            registered("", "/lib/assets"),
            registered("Again", "/lib/./assets"),
            registered("Empty", ""),
            registered(" Shared ", "/mnt/shared"),
        ]);
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0].name, "assets");
        assert_eq!(choices[1].name, "Shared");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolution_precedence() {
        let mut config = CatalogerConfig {
            registered_libraries: vec![registered("Main", "/lib/registered")],
            asset_library_root_folder: Some(PathBuf::from("/lib/manual")),
            ..CatalogerConfig::default()
        };
        let project = Path::new("/work/scene.blend");

        config.asset_library = Some(library_id_for_path(Path::new("/lib/registered")));
        let root = resolve_library_root(&config, Some(project)).unwrap();
        assert_eq!(root.source, RootSource::Registered);
        assert_eq!(root.path, PathBuf::from("/lib/registered"));

        config.asset_library = Some("LIB_UNKNOWN".to_string());
        let root = resolve_library_root(&config, Some(project)).unwrap();
        assert_eq!(root.source, RootSource::Manual);
        assert_eq!(root.path, PathBuf::from("/lib/manual"));

        config.asset_library_root_folder = Some(PathBuf::from("   "));
        let root = resolve_library_root(&config, Some(project)).unwrap();
        assert_eq!(root.source, RootSource::Project);

        config.asset_library_root_folder = None;
        let root = resolve_library_root(&config, Some(project)).unwrap();
        assert_eq!(root.source, RootSource::Project);
        assert_eq!(root.path, PathBuf::from("/work"));

        assert!(resolve_library_root(&config, None).is_none());
        assert!(matches!(
            require_library_root(&config, None),
            Err(CatalogerError::Config(_))
        ));
    }
}
