//! Transport layer for the exaroton API client.
//!
//! Provides the [`HttpTransport`] trait, the one capability the client
//! needs from an HTTP stack (method, URL, headers, body in; status,
//! headers, body out), plus a client-side [`WebSocketConnection`] for live
//! server status.
//!
//! # Feature Flags
//!
//! - `reqwest` (default): [`ReqwestTransport`], an `HttpTransport` over `reqwest`
//! - `websocket` (default): [`WebSocketConnection`] via `tokio-tungstenite`

mod error;
#[cfg(feature = "reqwest")]
mod http;
mod message;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;
pub use message::{ByteStream, HttpRequest, HttpResponse, Method, RequestBody, reader_stream};
#[cfg(feature = "websocket")]
pub use websocket::WebSocketConnection;

use std::fmt;
use std::future::Future;

/// Opaque identifier for a websocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ws-{}", self.0)
    }
}

/// Sends HTTP requests.
///
/// The client is generic over this trait so tests (or callers with their
/// own HTTP stack) can swap the network out. Implementations don't
/// interpret status codes; a 404 is a successful `send`.
///
/// # Example
///
/// ```rust
/// use exaroton_transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
///
/// /// Answers every request with an empty 200.
/// struct Always200;
///
/// impl HttpTransport for Always200 {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::new(200, Vec::new()))
///     }
/// }
/// ```
pub trait HttpTransport: Send + Sync + 'static {
    /// Sends `request` and returns the response with its body unread.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}
