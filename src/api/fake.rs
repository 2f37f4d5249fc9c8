//! In-memory transport for tests that do not need the wire.

use std::sync::Mutex;

use super::{Error, Method, Request, Response, Result, Transport, ROOMS_PATH};

/// In-memory transport serving a fixed room list and recording every call
pub struct RecordingTransport {
    rooms_status: u16,
    rooms_body: Mutex<String>,
    requests: Mutex<Vec<Request>>,
}

impl RecordingTransport {
    pub fn new(rooms_body: &str) -> Self {
        Self::with_status(200, rooms_body)
    }

    /// Answer the room listing with an arbitrary status
    pub fn with_status(rooms_status: u16, rooms_body: &str) -> Self {
        Self {
            rooms_status,
            rooms_body: Mutex::new(rooms_body.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve `(room_id, name)` pairs as the room list
    pub fn with_rooms(rooms: &[(u64, &str)]) -> Self {
        Self::new(&rooms_json(rooms))
    }

    /// Replace the room list served from now on
    pub fn set_rooms(&self, rooms: &[(u64, &str)]) {
        *self.rooms_body.lock().unwrap() = rooms_json(rooms);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn room_fetches(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.path == ROOMS_PATH)
            .count()
    }

    pub fn posts(&self) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::Post)
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &Request) -> Result<Response> {
        if request.path.is_empty() {
            return Err(Error::EndpointMissing);
        }
        self.requests.lock().unwrap().push(request.clone());

        if request.path == ROOMS_PATH {
            return Ok(Response {
                status: self.rooms_status,
                body: self.rooms_body.lock().unwrap().clone().into_bytes(),
            });
        }

        let body = if request.has_attachment() {
            r#"{"file_id":1}"#.to_string()
        } else {
            r#"{"message_id":"1"}"#.to_string()
        };
        Ok(Response {
            status: 200,
            body: body.into_bytes(),
        })
    }
}

fn rooms_json(rooms: &[(u64, &str)]) -> String {
    let list: Vec<_> = rooms
        .iter()
        .map(|(id, name)| serde_json::json!({ "room_id": id, "name": name, "type": "group" }))
        .collect();
    serde_json::Value::Array(list).to_string()
}
