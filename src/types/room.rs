use serde::{Deserialize, Serialize};

/// A chat room visible to the API token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: u64,
    pub name: String,
}

/// Answer to a posted message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSent {
    pub message_id: String,
}

/// Answer to an uploaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSent {
    pub file_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_ignores_extra_fields() {
        let json = r#"[
            {"room_id": 123, "name": "Group Chat Name", "type": "group", "role": "admin", "sticky": false, "unread_num": 10},
            {"room_id": 5, "name": "My Chat", "type": "my"}
        ]"#;
        let rooms: Vec<Room> = serde_json::from_str(json).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room_id, 123);
        assert_eq!(rooms[1].name, "My Chat");
    }
}
