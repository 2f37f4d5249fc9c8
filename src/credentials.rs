use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Default location of the credential file, relative to the working directory
pub const CREDENTIALS_FILE: &str = ".config/config.json";

/// Name and API token captured by `cw configure`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    #[serde(rename = "apitoken")]
    pub api_token: String,
}

impl Credentials {
    /// Token with everything but the last four characters hidden
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.api_token.chars().collect();
        let visible = chars.len().min(4);
        let hidden = chars.len() - visible;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{}", "*".repeat(hidden), tail)
    }
}

/// Reads and writes the credential file
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.auth.credentials_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load stored credentials, `None` when not configured yet
    pub fn load(&self) -> Result<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read credential file: {:?}", self.path))?;
        let credentials = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse credential file: {:?}", self.path))?;
        Ok(Some(credentials))
    }

    /// Write credentials, creating the parent directory if needed
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }
        let content =
            serde_json::to_string_pretty(credentials).context("Failed to serialize credentials")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Cannot save config as file: {:?}", self.path))?;
        tracing::debug!("Saved credentials to {:?}", self.path);
        Ok(())
    }
}
