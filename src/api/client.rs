use std::path::Path;
use std::time::Duration;

use super::{
    files_path, messages_path, Error, HttpTransport, Request, Response, Result, RoomDirectory,
    Transport,
};
use crate::config::Config;
use crate::types::Room;

/// Chatwork API client bound to one API token.
///
/// Rooms are addressed by name; the name to id mapping is fetched on first
/// use and kept for the lifetime of the client.
pub struct ChatworkClient<T: Transport = HttpTransport> {
    transport: T,
    directory: RoomDirectory,
}

impl ChatworkClient<HttpTransport> {
    /// Create a new client talking to the configured API endpoint
    pub fn new(config: &Config, token: impl Into<String>) -> Result<Self> {
        let transport = HttpTransport::new(
            &config.api.base_url,
            token,
            Duration::from_secs(config.api.timeout),
        )?;
        Ok(Self::with_transport(transport))
    }
}

impl<T: Transport> ChatworkClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            directory: RoomDirectory::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the rooms visible to the token, refreshing the name lookup
    pub fn rooms(&self) -> Result<Vec<Room>> {
        let index = self.directory.refresh(&self.transport)?;
        Ok(index.rooms().to_vec())
    }

    /// Resolve a room name to its id
    pub fn room_id(&self, name: &str) -> Result<Option<u64>> {
        self.directory.resolve(&self.transport, name)
    }

    fn require_room(&self, name: &str) -> Result<u64> {
        self.room_id(name)?
            .ok_or_else(|| Error::RoomNotFound(name.to_string()))
    }

    /// Post a text message to the named room
    pub fn send_message(&self, room: &str, message: &str) -> Result<Response> {
        let room_id = self.require_room(room)?;
        tracing::debug!("Sending message to room {} ({})", room, room_id);

        self.transport.execute(&Request::form(
            messages_path(room_id),
            vec![("body".to_string(), message.to_string())],
        ))
    }

    /// Upload a file with a message to the named room
    pub fn send_message_with_file(
        &self,
        room: &str,
        message: &str,
        file: impl AsRef<Path>,
    ) -> Result<Response> {
        let room_id = self.require_room(room)?;
        tracing::debug!(
            "Uploading {} to room {} ({})",
            file.as_ref().display(),
            room,
            room_id
        );

        self.transport.execute(&Request::multipart(
            files_path(room_id),
            message,
            file.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use stub_server::{Route, StubServer};

    use super::*;
    use crate::api::fake::RecordingTransport;
    use crate::api::{Method, Payload};

    #[test]
    fn test_send_message_posts_form_to_room() {
        let client = ChatworkClient::with_transport(RecordingTransport::with_rooms(&[(1, "general")]));

        let res = client.send_message("general", "hi").unwrap();
        assert!(res.is_success());

        let posts = client.transport().posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].path, "rooms/1/messages");
        assert_eq!(posts[0].method, Method::Post);
        assert_eq!(
            posts[0].payload,
            Payload::Form(vec![("body".to_string(), "hi".to_string())])
        );
    }

    #[test]
    fn test_unknown_room_sends_nothing() {
        let client = ChatworkClient::with_transport(RecordingTransport::new("[]"));

        match client.send_message("general", "hi").unwrap_err() {
            Error::RoomNotFound(name) => assert_eq!(name, "general"),
            other => panic!("expected RoomNotFound, got {:?}", other),
        }
        assert!(client.transport().posts().is_empty());
        assert_eq!(client.transport().room_fetches(), 1);
    }

    #[test]
    fn test_unknown_room_with_file_sends_nothing() {
        let client = ChatworkClient::with_transport(RecordingTransport::with_rooms(&[(1, "general")]));

        let err = client
            .send_message_with_file("random", "hi", "/tmp/report.pdf")
            .unwrap_err();
        assert!(matches!(err, Error::RoomNotFound(_)));
        assert!(client.transport().posts().is_empty());
    }

    #[test]
    fn test_send_file_posts_multipart_to_room() {
        let client = ChatworkClient::with_transport(RecordingTransport::with_rooms(&[
            (3, "random"),
            (7, "general"),
        ]));

        client
            .send_message_with_file("general", "hi", "/tmp/report.pdf")
            .unwrap();

        let posts = client.transport().posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].path, "rooms/7/files");
        assert_eq!(posts[0].method, Method::Post);
        assert_eq!(
            posts[0].payload,
            Payload::Multipart {
                message: "hi".to_string(),
                file_path: PathBuf::from("/tmp/report.pdf"),
            }
        );
    }

    #[test]
    fn test_sends_reuse_the_room_lookup() {
        let client = ChatworkClient::with_transport(RecordingTransport::with_rooms(&[
            (1, "general"),
            (2, "random"),
        ]));

        client.send_message("general", "one").unwrap();
        client.send_message("random", "two").unwrap();
        client
            .send_message_with_file("general", "three", "/tmp/a.txt")
            .unwrap();

        assert_eq!(client.transport().room_fetches(), 1);
        let paths: Vec<_> = client
            .transport()
            .posts()
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, ["rooms/1/messages", "rooms/2/messages", "rooms/1/files"]);
    }

    #[test]
    fn test_rooms_always_refetches() {
        let client = ChatworkClient::with_transport(RecordingTransport::with_rooms(&[
            (1, "general"),
            (2, "random"),
        ]));

        assert_eq!(client.room_id("random").unwrap(), Some(2));
        let rooms = client.rooms().unwrap();
        assert_eq!(
            rooms,
            vec![
                Room {
                    room_id: 1,
                    name: "general".to_string()
                },
                Room {
                    room_id: 2,
                    name: "random".to_string()
                },
            ]
        );
        assert_eq!(client.transport().room_fetches(), 2);
    }

    fn wire_client(server: &StubServer) -> ChatworkClient {
        let http = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap();
        ChatworkClient::with_transport(HttpTransport::with_client(
            http,
            server.base_url(),
            "secret-token",
        ))
    }

    #[test]
    fn test_missing_attachment_stops_before_upload() {
        let server = StubServer::start(vec![
            Route::get("/v2/rooms", 200, r#"[{"room_id":7,"name":"general"}]"#),
            Route::post("/v2/rooms/7/files", 200, r#"{"file_id":1}"#),
        ]);
        let client = wire_client(&server);

        let err = client
            .send_message_with_file("general", "hi", "/nonexistent/report.pdf")
            .unwrap_err();
        assert!(matches!(err, Error::FileOpen { .. }));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/v2/rooms");
    }

    #[test]
    fn test_send_file_uploads_message_and_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"PDFCONTENT").unwrap();

        let server = StubServer::start(vec![
            Route::get("/v2/rooms", 200, r#"[{"room_id":7,"name":"general"}]"#),
            Route::post("/v2/rooms/7/files", 200, r#"{"file_id":1}"#),
        ]);
        let client = wire_client(&server);

        let res = client
            .send_message_with_file("general", "hi", file.path())
            .unwrap();
        assert!(res.is_success());

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        let upload = &requests[1];
        assert_eq!(upload.method, "POST");
        assert_eq!(upload.path, "/v2/rooms/7/files");
        let body = upload.body_text();
        assert!(body.contains("name=\"message\"\r\n\r\nhi\r\n"));
        assert!(body.contains("name=\"file\""));
        assert!(body.contains("\r\n\r\nPDFCONTENT\r\n"));
    }

    #[test]
    fn test_send_message_posts_body_field() {
        let server = StubServer::start(vec![
            Route::get("/v2/rooms", 200, r#"[{"room_id":1,"name":"general"}]"#),
            Route::post("/v2/rooms/1/messages", 200, r#"{"message_id":"9"}"#),
        ]);
        let client = wire_client(&server);

        client.send_message("general", "hi").unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].path, "/v2/rooms/1/messages");
        assert_eq!(requests[1].body_text(), "body=hi");
    }
}
