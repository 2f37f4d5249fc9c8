use std::time::Duration;

use reqwest::blocking::{multipart, Client};

use super::{Error, Payload, Request, Response, Result, TOKEN_HEADER};

/// Executes a single request against the API.
///
/// Implementations return the body for every status code; only failures to
/// build, send or read the request are errors.
pub trait Transport {
    fn execute(&self, request: &Request) -> Result<Response>;
}

/// Blocking HTTP transport authenticated with an API token
pub struct HttpTransport {
    http: Client,
    base_url: String,
    token: String,
}

impl HttpTransport {
    /// Create a transport with its own HTTP client
    pub fn new(base_url: &str, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::RequestConstruction)?;
        Ok(Self::with_client(http, base_url, token))
    }

    /// Create a transport on top of an already configured HTTP client
    pub fn with_client(http: Client, base_url: &str, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build the HTTP request without sending it.
    ///
    /// Attachments are opened here, so a missing file fails before any
    /// connection is made.
    pub fn build(&self, request: &Request) -> Result<reqwest::blocking::Request> {
        if request.path.is_empty() {
            return Err(Error::EndpointMissing);
        }
        let url = self.url(&request.path);

        let builder = match &request.payload {
            Payload::Empty => self.http.request(to_reqwest(request), &url),
            Payload::Form(fields) => self.http.request(to_reqwest(request), &url).form(fields),
            Payload::Multipart { message, file_path } => {
                let form = multipart::Form::new()
                    .text("message", message.clone())
                    .file("file", file_path)
                    .map_err(|source| Error::FileOpen {
                        path: file_path.clone(),
                        source,
                    })?;
                // The files endpoint only accepts POST
                self.http.post(&url).multipart(form)
            }
        };

        builder
            .header(TOKEN_HEADER, &self.token)
            .build()
            .map_err(Error::RequestConstruction)
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &Request) -> Result<Response> {
        let req = self.build(request)?;
        let url = req.url().to_string();
        tracing::debug!("{} {}", req.method(), url);

        let res = self
            .http
            .execute(req)
            .map_err(|source| Error::Network { url, source })?;
        let status = res.status().as_u16();
        let body = res.bytes().map_err(Error::ResponseRead)?.to_vec();

        tracing::debug!(
            "Response {}: {}",
            status,
            String::from_utf8_lossy(&body)
        );
        Ok(Response { status, body })
    }
}

fn to_reqwest(request: &Request) -> reqwest::Method {
    match request.method {
        super::Method::Get => reqwest::Method::GET,
        super::Method::Post => reqwest::Method::POST,
    }
}
