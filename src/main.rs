use anyhow::Result;
use auto_cataloger::cli::{
    commands::{
        apply::ApplyCommand, preview::PreviewCommand, restore::RestoreCommand,
        status::StatusCommand, CommandContext, CommandHandler,
    },
    Cli, Commands, LogLevel,
};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize tracing from `--log-level`; logs go to stderr so stdout stays machine-readable
fn initialize_tracing(log_level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let context = CommandContext::new(cli.config, cli.state_dir);
    let command: Box<dyn CommandHandler> = match cli.command {
        Commands::Preview {
            items,
            overrides,
            json,
        } => Box::new(PreviewCommand::new(context, items, overrides, json)),
        Commands::Apply {
            items,
            overrides,
            json,
        } => Box::new(ApplyCommand::new(context, items, overrides, json)),
        Commands::Restore {
            project_file,
            overrides,
        } => Box::new(RestoreCommand::new(context, project_file, overrides)),
        Commands::Status {
            project_file,
            overrides,
            json,
        } => Box::new(StatusCommand::new(context, project_file, overrides, json)),
    };

    debug!("Running {} command", command.name());
    command.execute()?;
    Ok(())
}
