/// Errors that can occur in the transport layer.
///
/// These are passed up to callers as-is: the client does not translate
/// timeouts or connection failures into API errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client failed (connect, TLS, timeout, redirect loop, ...).
    #[cfg(feature = "reqwest")]
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The websocket handshake or a frame operation failed.
    #[cfg(feature = "websocket")]
    #[error("websocket failed: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Reading a streamed request or response body failed.
    #[error("body stream failed: {0}")]
    Body(#[source] std::io::Error),

    /// The connection was closed.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// The request could not be built (bad URL, bad header value).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
