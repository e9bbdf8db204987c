mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use maclist_config::Config;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or_default() {
        cli::Commands::Mask(args) => commands::mask::handle(args, config),
        cli::Commands::Verify { path, placeholder } => {
            commands::verify::handle(&path, placeholder, &config)
        }
        cli::Commands::Config => commands::config::handle(&config),
    }
}
