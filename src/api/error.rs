use std::path::PathBuf;

/// Errors raised by the Chatwork client.
///
/// Transport failures keep their underlying cause as the error source, so
/// callers adding context with `anyhow` still get the full chain.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Endpoint isn't set in request")]
    EndpointMissing,

    #[error("Failed to create request")]
    RequestConstruction(#[source] reqwest::Error),

    #[error("Failed to request {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response")]
    ResponseRead(#[source] reqwest::Error),

    #[error("Failed to open attachment: {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode response")]
    Decode(#[source] serde_json::Error),

    #[error("Room [{0}] doesn't exist in your account")]
    RoomNotFound(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
