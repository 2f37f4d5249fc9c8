use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;

use chatwork_cli::api::Response;
use chatwork_cli::config::Config;
use chatwork_cli::types::{FileSent, MessageSent};
use chatwork_cli::ChatworkClient;

use super::output::{print_error, print_success};
use super::{api_token, OutputFormat};

/// Largest attachment the files endpoint accepts
pub const MAX_ATTACHMENT_SIZE: u64 = 5 * 1024 * 1024;

#[derive(Args, Debug, Default)]
pub struct SendArgs {
    /// Name of the room to send to
    #[arg(long)]
    pub to: Option<String>,

    /// Message content
    #[arg(short, long)]
    pub message: Option<String>,

    /// Read the message from a template file (takes precedence over --message)
    #[arg(long)]
    pub tpl: Option<PathBuf>,

    /// Attach a file (up to 5 MB)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

pub fn execute(
    args: SendArgs,
    token: Option<String>,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let token = api_token(token, config)?;

    let room = args
        .to
        .filter(|r| !r.is_empty())
        .ok_or_else(|| anyhow!("Please set the room name to send to with --to"))?;

    let message = message_content(args.message, args.tpl.as_deref())?;

    if let Some(path) = &args.file {
        check_attachment(path)?;
    }

    let client = ChatworkClient::new(config, token)?;
    let res = match &args.file {
        Some(path) => client.send_message_with_file(&room, &message, path),
        None => client.send_message(&room, &message),
    }
    .with_context(|| format!("Failed to send to room [{}]", room))?;

    report(&res, args.file.is_some(), format)
}

/// Message from the template file when it can be read, otherwise from --message
fn message_content(message: Option<String>, tpl: Option<&Path>) -> Result<String> {
    let from_tpl = tpl.and_then(|path| match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::warn!("Cannot read template {:?}: {}", path, e);
            None
        }
    });

    match from_tpl.or(message) {
        Some(content) if !content.is_empty() => Ok(content),
        _ => bail!("Please set message or message template with --message, --tpl"),
    }
}

fn check_attachment(path: &Path) -> Result<()> {
    let meta = fs::metadata(path).map_err(|_| anyhow!("File not found: {}", path.display()))?;
    if !meta.is_file() {
        bail!("Not a file: {}", path.display());
    }
    if meta.len() > MAX_ATTACHMENT_SIZE {
        bail!("File size is accepted up to 5MB: {}", path.display());
    }
    Ok(())
}

fn report(res: &Response, with_file: bool, format: OutputFormat) -> Result<()> {
    if !res.is_success() {
        print_error("Chatwork rejected the request");
        eprintln!("{}", res.text());
        bail!("Chatwork API returned status {}", res.status);
    }

    let id = if with_file {
        serde_json::from_slice::<FileSent>(&res.body)
            .ok()
            .map(|sent| sent.file_id.to_string())
    } else {
        serde_json::from_slice::<MessageSent>(&res.body)
            .ok()
            .map(|sent| sent.message_id)
    };

    match format {
        OutputFormat::Json => println!("{}", res.text()),
        OutputFormat::Plain => println!("{}", id.unwrap_or_default()),
        OutputFormat::Table => match id {
            Some(id) => print_success(&format!("Successfully sent. (id: {})", id)),
            None => print_success("Successfully sent."),
        },
    }
    Ok(())
}
