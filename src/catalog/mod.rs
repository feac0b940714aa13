//! Asset catalog index management
//!
//! # Overview
//!
//! An asset library root holds one catalog index file:
//!
//! ```text
//! <library root>/
//!     ├── blender_assets.cats.txt      ← header lines + uuid:path:name entries
//!     └── blender_assets.cats.txt.bak  ← copy taken before the last rewrite
//! ```
//!
//! `path` holds the text rules shared with the planner; `store` reads,
//! merges and writes the file.

pub mod path;
pub mod store;

pub use path::{compose_catalog_path, normalize_path_fragment, pretty_catalog_leaf, safe_segment};
pub use store::{
    catalog_files, ensure_catalogs, restore_backup, CatalogEntry, CatalogFiles, CatalogStore,
    EnsureOutcome, CATALOG_FILE_NAME,
};
