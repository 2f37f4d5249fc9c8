//! Canned-response HTTP server for exercising the Chatwork client over the wire.
//!
//! Every request is recorded, then answered from the first route matching its
//! method and path. Unmatched requests get a 404.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Router,
};

/// A request as the server received it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    /// Header names are lowercase
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Canned answer for one method and path
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    path: String,
    status: u16,
    body: String,
}

impl Route {
    pub fn get(path: &str, status: u16, body: &str) -> Self {
        Self::new(Method::GET, path, status, body)
    }

    pub fn post(path: &str, status: u16, body: &str) -> Self {
        Self::new(Method::POST, path, status, body)
    }

    fn new(method: Method, path: &str, status: u16, body: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Clone)]
struct Shared {
    routes: Arc<Vec<Route>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Server running on a background thread for the rest of the test process
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    /// Bind a random local port and start serving `routes`
    pub fn start(routes: Vec<Route>) -> Self {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = Shared {
            routes: Arc::new(routes),
            requests: Arc::clone(&requests),
        };

        thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                let app = Router::new().fallback(answer).with_state(state);
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        Self {
            base_url: format!("http://{addr}/v2"),
            requests,
        }
    }

    /// API base URL, `http://127.0.0.1:<port>/v2`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn answer(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let path = uri.path().to_string();
    let recorded = Recorded {
        method: method.to_string(),
        path: path.clone(),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body: body.to_vec(),
    };
    state.requests.lock().unwrap().push(recorded);

    let json = [(header::CONTENT_TYPE, "application/json")];
    match state
        .routes
        .iter()
        .find(|route| route.method == method && route.path == path)
    {
        Some(route) => (
            StatusCode::from_u16(route.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            json,
            route.body.clone(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            json,
            r#"{"errors":["Not found"]}"#.to_string(),
        ),
    }
}
