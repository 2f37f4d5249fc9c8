use anyhow::{Context, Result};
use serde::Serialize;
use tabled::Tabled;

use chatwork_cli::config::Config;
use chatwork_cli::ChatworkClient;

use super::output::{print_info, print_output};
use super::{api_token, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct RoomRow {
    #[tabled(rename = "RoomID")]
    room_id: u64,
    #[tabled(rename = "Name")]
    name: String,
}

pub fn execute(token: Option<String>, config: &Config, format: OutputFormat) -> Result<()> {
    let client = ChatworkClient::new(config, api_token(token, config)?)?;
    let rooms = client.rooms().context("Cannot get rooms")?;

    if rooms.is_empty() {
        if let OutputFormat::Table = format {
            print_info("No rooms found for this API token");
            return Ok(());
        }
    }

    let rows: Vec<RoomRow> = rooms
        .into_iter()
        .map(|room| RoomRow {
            room_id: room.room_id,
            name: room.name,
        })
        .collect();

    print_output(&rows, format)
}
