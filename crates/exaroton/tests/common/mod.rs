//! Shared test helpers: an in-memory `HttpTransport` and JSON fixtures.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use exaroton::{ExarotonClient, HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use futures_util::StreamExt;
use futures_util::stream;

/// What the mock saw for one request, body already collected.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

/// A queued response. `broken` bodies fail after their first chunk.
struct Queued {
    status: u16,
    body: Vec<u8>,
    broken: bool,
}

#[derive(Default)]
struct State {
    requests: Vec<Recorded>,
    responses: VecDeque<Queued>,
}

/// Records every request and answers with queued responses in order.
///
/// With nothing queued it answers `500` so a stray request fails loudly.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response.
    pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.queue(status, body.into(), false)
    }

    /// Queues a response whose body yields `chunk` and then drops the
    /// connection.
    pub fn respond_broken(&self, status: u16, chunk: impl Into<Vec<u8>>) -> &Self {
        self.queue(status, chunk.into(), true)
    }

    fn queue(&self, status: u16, body: Vec<u8>, broken: bool) -> &Self {
        self.state.lock().unwrap().responses.push_back(Queued {
            status,
            body,
            broken,
        });
        self
    }

    /// Queues a `200` envelope with `data` as its payload.
    pub fn respond_data(&self, data: serde_json::Value) -> &Self {
        let body = serde_json::json!({ "success": true, "error": null, "data": data });
        self.respond(200, body.to_string())
    }

    /// Queues a `200` envelope with no payload and an error message.
    pub fn respond_error(&self, message: &str) -> &Self {
        let body = serde_json::json!({ "success": false, "error": message, "data": null });
        self.respond(200, body.to_string())
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> Recorded {
        self.state
            .lock()
            .unwrap()
            .requests
            .last()
            .cloned()
            .expect("a request should have been sent")
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let body = body.into_bytes().await?;

        let queued = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(Recorded {
                method,
                url,
                headers,
                body,
            });
            state
                .responses
                .pop_front()
                .unwrap_or(Queued {
                    status: 500,
                    body: b"no response queued".to_vec(),
                    broken: false,
                })
        };
        if !queued.broken {
            return Ok(HttpResponse::new(queued.status, queued.body));
        }
        let chunks = vec![
            Ok(queued.body),
            Err(TransportError::ConnectionClosed("reset by peer".to_string())),
        ];
        Ok(HttpResponse {
            status: queued.status,
            headers: Vec::new(),
            body: stream::iter(chunks).boxed(),
        })
    }
}

/// A client on a fresh mock, with token `test-token`.
pub fn client() -> (ExarotonClient<MockTransport>, MockTransport) {
    let mock = MockTransport::new();
    let client = ExarotonClient::with_transport(mock.clone(), "test-token");
    (client, mock)
}

/// A server payload with the given id and status code.
pub fn server_json(id: &str, status: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": "Survival",
        "address": "survival.exaroton.me",
        "motd": "Welcome!",
        "status": status,
        "host": null,
        "port": null,
        "players": { "max": 20, "count": 0, "list": [] },
        "software": { "id": "abc", "name": "Paper", "version": "1.21.1" },
        "shared": false
    })
}

/// A file-info payload. `children` is left out when `None`.
pub fn file_json(
    path: &str,
    is_directory: bool,
    children: Option<Vec<serde_json::Value>>,
) -> serde_json::Value {
    let name = path.rsplit('/').next().unwrap_or(path);
    let size = if is_directory { 0 } else { 128 };
    let mut value = serde_json::json!({
        "path": path,
        "name": name,
        "isTextFile": !is_directory,
        "isConfigFile": false,
        "isDirectory": is_directory,
        "isLog": false,
        "isReadable": true,
        "isWritable": true,
        "size": size,
    });
    if let Some(children) = children {
        value["children"] = serde_json::Value::Array(children);
    }
    value
}
