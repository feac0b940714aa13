pub mod library;
pub mod loader;
pub mod types;

pub use library::{
    library_choices, library_id_for_path, require_library_root, resolve_library_root,
    LibraryChoice, LibraryRoot, RootSource,
};
pub use loader::{validate_config, ConfigLoader};
pub use types::{
    CatalogerConfig, ClassificationMode, PrefixDelimiter, RegisteredLibrary, TargetType,
};
