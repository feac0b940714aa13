use super::preview::print_summary;
use super::{CommandContext, CommandHandler};
use crate::catalog::{catalog_files, CatalogStore};
use crate::cli::app::ConfigOverrides;
use crate::config::{library_choices, resolve_library_root, LibraryChoice, LibraryRoot};
use crate::state::PreviewState;
use crate::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Handler for the `status` command
pub struct StatusCommand {
    pub context: CommandContext,
    pub project_file: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    config_file: PathBuf,
    library_root: Option<LibraryRoot>,
    catalog_file: Option<PathBuf>,
    catalog_entries: usize,
    backup_available: bool,
    registered_libraries: Vec<LibraryChoice>,
    preview: PreviewState,
}

impl CommandHandler for StatusCommand {
    fn execute(&self) -> Result<()> {
        let config = self.context.load_config(&self.overrides)?;
        let library_root = resolve_library_root(&config, self.project_file.as_deref());

        let mut report = StatusReport {
            config_file: self.context.config_file.clone(),
            library_root: library_root.clone(),
            catalog_file: None,
            catalog_entries: 0,
            backup_available: false,
            registered_libraries: library_choices(&config.registered_libraries),
            preview: self.context.state_store().load()?,
        };
        if let Some(root) = &library_root {
            let files = catalog_files(&root.path);
            report.catalog_entries = CatalogStore::load(&files.catalog_file)?.len();
            report.backup_available = files.backup_file.exists();
            report.catalog_file = Some(files.catalog_file);
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_status(&report);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "status"
    }
}

impl StatusCommand {
    pub fn new(
        context: CommandContext,
        project_file: Option<PathBuf>,
        overrides: ConfigOverrides,
        json: bool,
    ) -> Self {
        Self {
            context,
            project_file,
            overrides,
            json,
        }
    }
}

fn print_status(report: &StatusReport) {
    println!("Config file: {}", report.config_file.display());
    match (&report.library_root, &report.catalog_file) {
        (Some(root), Some(catalog_file)) => {
            println!("Library root: {} ({})", root.path.display(), root.source);
            println!(
                "Catalog file: {} ({} entries)",
                catalog_file.display(),
                report.catalog_entries
            );
            println!(
                "Backup: {}",
                if report.backup_available { "available" } else { "none" }
            );
        }
        _ => println!("Library root: not resolved"),
    }

    if !report.registered_libraries.is_empty() {
        println!("Registered libraries:");
        for choice in &report.registered_libraries {
            println!("  {}  {}  {}", choice.id, choice.name, choice.path.display());
        }
    }

    match (&report.preview.previewed_at, report.preview.ready) {
        (Some(at), true) => println!("Preview: ready (taken {})", at.to_rfc3339()),
        (Some(at), false) => println!("Preview: applied (last taken {})", at.to_rfc3339()),
        (None, _) => println!("Preview: none"),
    }
    if let Some(summary) = &report.preview.last_preview {
        print_summary(summary);
    }
}
