use std::path::PathBuf;

/// HTTP method of an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

/// Request body. The variant decides how the transport encodes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
    /// `multipart/form-data` with a `message` field and a `file` part
    Multipart { message: String, file_path: PathBuf },
}

/// One call against the Chatwork API
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    /// Resource path relative to the API base URL
    pub path: String,
    pub method: Method,
    pub payload: Payload,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn form(path: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            method: Method::Post,
            payload: Payload::Form(fields),
        }
    }

    pub fn multipart(
        path: impl Into<String>,
        message: impl Into<String>,
        file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            path: path.into(),
            method: Method::Post,
            payload: Payload::Multipart {
                message: message.into(),
                file_path: file_path.into(),
            },
        }
    }

    pub fn has_attachment(&self) -> bool {
        matches!(self.payload, Payload::Multipart { .. })
    }
}

/// Raw API response. The body is returned whatever the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
