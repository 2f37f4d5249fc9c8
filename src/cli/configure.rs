use std::io::{self, BufRead, IsTerminal};

use anyhow::{bail, Context, Result};
use clap::Args;
use dialoguer::Input;
use serde::Serialize;

use chatwork_cli::config::Config;
use chatwork_cli::credentials::{CredentialStore, Credentials};

use super::output::{print_single, print_success};
use super::OutputFormat;

#[derive(Args, Debug)]
pub struct ConfigureCommand {
    /// Show the saved configuration instead of prompting
    #[arg(short, long)]
    pub list: bool,
}

#[derive(Debug, Serialize)]
struct SavedConfig {
    name: String,
    apitoken: String,
    path: String,
}

pub fn execute(cmd: ConfigureCommand, config: &Config, format: OutputFormat) -> Result<()> {
    let store = CredentialStore::from_config(config);
    if cmd.list {
        list(&store, format)
    } else {
        prompt(&store)
    }
}

fn list(store: &CredentialStore, format: OutputFormat) -> Result<()> {
    let Some(credentials) = store.load()? else {
        bail!("Not configured yet. Please run `cw configure` before using.");
    };

    let saved = SavedConfig {
        apitoken: credentials.masked_token(),
        name: credentials.name,
        path: store.path().display().to_string(),
    };

    match format {
        OutputFormat::Json => print_single(&saved)?,
        OutputFormat::Table | OutputFormat::Plain => {
            println!("Name:     {}", saved.name);
            println!("APIToken: {}", saved.apitoken);
            println!("File:     {}", saved.path);
        }
    }
    Ok(())
}

fn prompt(store: &CredentialStore) -> Result<()> {
    let stdin = io::stdin();
    let (name, api_token) = if stdin.is_terminal() {
        // Empty answers are rejected and asked again
        let name: String = Input::new().with_prompt("Put your name").interact_text()?;
        let api_token: String = Input::new()
            .with_prompt("Put your apitoken")
            .interact_text()?;
        (name, api_token)
    } else {
        read_answers(stdin.lock())?
    };

    store.save(&Credentials { name, api_token })?;
    print_success(&format!(
        "Saved configuration to {}",
        store.path().display()
    ));
    Ok(())
}

/// Name and token from piped input: the first two non-blank lines
fn read_answers(input: impl BufRead) -> Result<(String, String)> {
    let mut answers = input
        .lines()
        .map(|line| line.map(|l| l.trim().to_string()))
        .filter(|line| !matches!(line, Ok(l) if l.is_empty()));

    let name = answers
        .next()
        .transpose()
        .context("Failed to read name")?
        .context("Missing name on standard input")?;
    let api_token = answers
        .next()
        .transpose()
        .context("Failed to read apitoken")?
        .context("Missing apitoken on standard input")?;
    Ok((name, api_token))
}
