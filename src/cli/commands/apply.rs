use super::{CommandContext, CommandHandler};
use crate::cli::app::ConfigOverrides;
use crate::coordinator::{ApplyReport, Coordinator};
use crate::items::ItemManifest;
use crate::Result;
use std::path::PathBuf;

/// Handler for the `apply` command
pub struct ApplyCommand {
    pub context: CommandContext,
    pub items: PathBuf,
    pub overrides: ConfigOverrides,
    pub json: bool,
}

impl CommandHandler for ApplyCommand {
    fn execute(&self) -> Result<()> {
        let config = self.context.load_config(&self.overrides)?;
        let mut manifest = ItemManifest::load(&self.items)?;
        let store = self.context.state_store();

        let mut coordinator =
            Coordinator::with_state(config, manifest.project_file.clone(), store.load()?);
        let report = coordinator.apply(&mut manifest.items)?;

        manifest.save(&self.items)?;
        store.save(coordinator.state())?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "apply"
    }
}

impl ApplyCommand {
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

fn print_report(report: &ApplyReport) {
    println!(
        "✅ Assigned {} items to {} catalogs under {}",
        report.assigned,
        report.catalog_count,
        report.library_root.path.display()
    );
    println!("   New catalogs: {}", report.created);
    println!(
        "   Skipped: {} linked, {} outside root, {} non-assets",
        report.skipped_linked, report.skipped_external, report.skipped_non_asset
    );
    if report.auto_marked > 0 {
        println!("   Marked as assets: {}", report.auto_marked);
    }
}
