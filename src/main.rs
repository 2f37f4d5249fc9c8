mod cli;

use anyhow::Result;
use chatwork_cli::config::Config;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatwork_cli=warn,cw=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    // Execute command
    match cli.command {
        Some(Commands::Rooms) => cli::rooms::execute(cli.apitoken, &config, cli.format),
        Some(Commands::Configure(cmd)) => cli::configure::execute(cmd, &config, cli.format),
        Some(Commands::Completions(cmd)) => cli::completions::execute(cmd),
        None => cli::send::execute(cli.send, cli.apitoken, &config, cli.format),
    }
}
