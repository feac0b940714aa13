//! Catalog index file (`blender_assets.cats.txt`) persistence.
//!
//! The file is a list of header lines followed by `uuid:path:name` entries.
//! Reading is lenient; writing is all-at-once after the in-memory merge, with
//! the previous file copied to a single `.bak` sibling first.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use super::path::{normalize_path_fragment, pretty_catalog_leaf};
use crate::{CatalogerError, Result};

/// Name of the catalog index file inside an asset library root
pub const CATALOG_FILE_NAME: &str = "blender_assets.cats.txt";

/// Suffix appended to the catalog file name for the backup copy
pub const BACKUP_SUFFIX: &str = ".bak";

const VERSION_PREFIX: &str = "VERSION ";

/// Header written when no catalog file exists yet
pub const DEFAULT_HEADER_LINES: [&str; 3] = [
    "# This is an Asset Catalog Definition file for Blender.",
    "# Managed by Auto Cataloger.",
    "VERSION 1",
];

/// One catalog definition line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub uuid: String,
    pub path: String,
    pub display_name: String,
}

impl CatalogEntry {
    fn to_line(&self) -> String {
        format!("{}:{}:{}", self.uuid, self.path, self.display_name)
    }
}

/// Catalog and backup file locations for one library root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFiles {
    pub catalog_file: PathBuf,
    pub backup_file: PathBuf,
}

/// Resolve the catalog and backup paths under a library root
pub fn catalog_files(library_root: &Path) -> CatalogFiles {
    let catalog_file = library_root.join(CATALOG_FILE_NAME);
    let backup_file = library_root.join(format!("{CATALOG_FILE_NAME}{BACKUP_SUFFIX}"));
    CatalogFiles {
        catalog_file,
        backup_file,
    }
}

/// Result of merging requested paths into the store
#[derive(Debug, Clone, Default)]
pub struct EnsureOutcome {
    /// Every catalog path in the store mapped to its UUID
    pub uuid_by_path: BTreeMap<String, String>,
    /// Number of entries minted by this call
    pub created: usize,
}

/// In-memory view of a catalog index file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStore {
    headers: Vec<String>,
    entries: BTreeMap<String, CatalogEntry>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            headers: DEFAULT_HEADER_LINES.iter().map(|l| l.to_string()).collect(),
            entries: BTreeMap::new(),
        }
    }
}

impl CatalogStore {
    /// Load a catalog file, or the default header with no entries when missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Catalog file {} not found, starting empty", path.display());
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| CatalogerError::file("read", path, e))?;
        Ok(Self::parse(&content))
    }

    /// Parse catalog file content.
    ///
    /// Lines that are neither headers nor `uuid:path:name` are dropped.
    pub fn parse(content: &str) -> Self {
        let mut headers = Vec::new();
        let mut entries = BTreeMap::new();

        for line in content.lines() {
            let stripped = line.trim();
            if stripped.is_empty() {
                continue;
            }
            if stripped.starts_with('#') || stripped.starts_with(VERSION_PREFIX) {
                headers.push(stripped.to_string());
                continue;
            }
            let mut parts = stripped.splitn(3, ':');
            let (Some(uuid), Some(path), Some(name)) = (parts.next(), parts.next(), parts.next())
            else {
                debug!("Dropping malformed catalog line: {}", stripped);
                continue;
            };
            entries.insert(
                path.to_string(),
                CatalogEntry {
                    uuid: uuid.to_string(),
                    path: path.to_string(),
                    display_name: name.to_string(),
                },
            );
        }

        if headers.is_empty() {
            headers = DEFAULT_HEADER_LINES.iter().map(|l| l.to_string()).collect();
        }
        if !headers.iter().any(|l| l.starts_with(VERSION_PREFIX)) {
            headers.push(format!("{VERSION_PREFIX}1"));
        }

        Self { headers, entries }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn entry(&self, path: &str) -> Option<&CatalogEntry> {
        self.entries.get(path)
    }

    /// Entries in path order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry for `requested` unless one exists.
    ///
    /// Returns the normalized path and whether a new entry was minted, or
    /// `None` when the path normalizes to nothing.
    pub fn ensure_path(&mut self, requested: &str) -> Option<(String, bool)> {
        let norm = normalize_path_fragment(requested);
        if norm.is_empty() {
            return None;
        }
        if self.entries.contains_key(&norm) {
            return Some((norm, false));
        }
        let entry = CatalogEntry {
            uuid: Uuid::new_v4().to_string(),
            path: norm.clone(),
            display_name: pretty_catalog_leaf(&norm),
        };
        debug!("Minted catalog {} -> {}", entry.path, entry.uuid);
        self.entries.insert(norm.clone(), entry);
        Some((norm, true))
    }

    /// Every catalog path mapped to its UUID
    pub fn uuid_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(path, entry)| (path.clone(), entry.uuid.clone()))
            .collect()
    }

    /// Render the file content: headers, sorted entries, one trailing newline
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .headers
            .iter()
            .map(|l| l.trim_end().to_string())
            .collect();
        lines.extend(self.entries.values().map(CatalogEntry::to_line));
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Write the store, copying any existing file to the `.bak` sibling first
    pub fn write_with_backup(&self, path: &Path) -> Result<()> {
        if path.exists() {
            let backup = backup_path_for(path);
            fs::copy(path, &backup).map_err(|e| CatalogerError::file("back up", &backup, e))?;
            debug!("Backed up {} to {}", path.display(), backup.display());
        }

        fs::write(path, self.render()).map_err(|e| CatalogerError::file("write", path, e))?;
        info!(
            "Wrote {} catalog entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }
}

fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Make sure every requested catalog path exists in the library's catalog file.
///
/// The file is rewritten only when at least one entry was created.
pub fn ensure_catalogs(library_root: &Path, catalog_paths: &[String]) -> Result<EnsureOutcome> {
    fs::create_dir_all(library_root)
        .map_err(|e| CatalogerError::file("create directory", library_root, e))?;
    let files = catalog_files(library_root);
    let mut store = CatalogStore::load(&files.catalog_file)?;

    let requested: BTreeSet<&str> = catalog_paths.iter().map(String::as_str).collect();
    let mut created = 0;
    for catalog_path in requested {
        if let Some((_, true)) = store.ensure_path(catalog_path) {
            created += 1;
        }
    }

    if created > 0 {
        store.write_with_backup(&files.catalog_file)?;
    } else {
        debug!("No new catalogs for {}", library_root.display());
    }

    Ok(EnsureOutcome {
        uuid_by_path: store.uuid_map(),
        created,
    })
}

/// Copy the `.bak` sibling back over the catalog file
pub fn restore_backup(library_root: &Path) -> Result<CatalogFiles> {
    let files = catalog_files(library_root);
    if !files.backup_file.exists() {
        return Err(CatalogerError::BackupMissing(files.backup_file));
    }

    fs::create_dir_all(library_root)
        .map_err(|e| CatalogerError::file("create directory", library_root, e))?;
    fs::copy(&files.backup_file, &files.catalog_file)
        .map_err(|e| CatalogerError::file("restore", &files.catalog_file, e))?;
    info!(
        "Restored catalog file from backup: {}",
        files.backup_file.display()
    );
    Ok(files)
}
