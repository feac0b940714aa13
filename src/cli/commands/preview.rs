use super::{CommandContext, CommandHandler};
use crate::cli::app::ConfigOverrides;
use crate::coordinator::Coordinator;
use crate::items::ItemManifest;
use crate::state::{PreviewState, PreviewSummary};
use crate::Result;
use std::path::PathBuf;
use tracing::warn;

/// Handler for the `preview` command
pub struct PreviewCommand {
    pub context: CommandContext,
    pub items: PathBuf,
    pub overrides: ConfigOverrides,
    pub json: bool,
}

impl CommandHandler for PreviewCommand {
    fn execute(&self) -> Result<()> {
        let store = self.context.state_store();
        let mut state = store.load().unwrap_or_else(|e| {
            warn!("Discarding unreadable preview state: {}", e);
            PreviewState::default()
        });
        // Forget the earlier preview before anything below can fail.
        if state.ready {
            state.reset();
            store.save(&state)?;
        }

        let config = self.context.load_config(&self.overrides)?;
        let manifest = ItemManifest::load(&self.items)?;

        let mut coordinator =
            Coordinator::with_state(config, manifest.project_file.clone(), state);
        let summary = coordinator.preview(&manifest.items)?;
        store.save(coordinator.state())?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "preview"
    }
}

impl PreviewCommand {
    pub fn new(
        context: CommandContext,
        items: PathBuf,
        overrides: ConfigOverrides,
        json: bool,
    ) -> Self {
        Self {
            context,
            items,
            overrides,
            json,
        }
    }
}

pub(crate) fn print_summary(summary: &PreviewSummary) {
    println!(
        "Library root: {} ({})",
        summary.library_root.path.display(),
        summary.library_root.source
    );
    println!(
        "Planned {} assignments into {} catalogs",
        summary.total, summary.catalog_count
    );
    println!(
        "Skipped: {} linked, {} outside root",
        summary.skipped_linked, summary.skipped_external
    );
    for row in &summary.rows {
        println!("  {} -> {}", row.item_name, row.catalog_path);
    }
    if summary.total > summary.rows.len() {
        println!("  ... and {} more", summary.total - summary.rows.len());
    }
}
