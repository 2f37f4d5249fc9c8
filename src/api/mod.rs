pub mod client;
pub mod directory;
pub mod error;
pub mod request;
pub mod transport;

#[cfg(test)]
pub(crate) mod fake;

pub use client::*;
pub use directory::RoomDirectory;
pub use error::{Error, Result};
pub use request::*;
pub use transport::*;

// Chatwork API v2
pub const API_BASE_URL: &str = "https://api.chatwork.com/v2/";
pub const TOKEN_HEADER: &str = "X-ChatWorkToken";

// Resource paths, relative to the base URL
pub const ROOMS_PATH: &str = "rooms";

pub fn messages_path(room_id: u64) -> String {
    format!("rooms/{}/messages", room_id)
}

pub fn files_path(room_id: u64) -> String {
    format!("rooms/{}/files", room_id)
}
