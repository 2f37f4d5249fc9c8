pub mod completions;
pub mod configure;
pub mod output;
pub mod rooms;
pub mod send;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};

use chatwork_cli::config::Config;
use chatwork_cli::credentials::CredentialStore;

/// Send Chatwork messages and files to rooms by name
#[derive(Parser, Debug)]
#[command(name = "cw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Chatwork API token (defaults to the one saved by `cw configure`)
    #[arg(
        long,
        visible_alias = "at",
        env = "CHATWORK_API_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub apitoken: Option<String>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub send: send::SendArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show rooms and their id
    Rooms,

    /// Save your name and API token for later runs
    #[command(visible_alias = "c")]
    Configure(configure::ConfigureCommand),

    /// Generate shell completions
    Completions(completions::CompletionsCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// JSON output (raw API responses)
    Json,
    /// Table output (best for humans)
    #[default]
    Table,
    /// Plain output (minimal, for scripting)
    Plain,
}

/// Pick the API token from the command line, falling back to the credential file
pub fn api_token(token: Option<String>, config: &Config) -> Result<String> {
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        return Ok(token);
    }

    let store = CredentialStore::from_config(config);
    match store.load()? {
        Some(credentials) if !credentials.api_token.is_empty() => Ok(credentials.api_token),
        _ => bail!("Require to set apitoken by at least --apitoken or `cw configure`"),
    }
}
