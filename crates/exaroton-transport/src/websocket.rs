//! Client-side WebSocket connection using `tokio-tungstenite`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::{ConnectionId, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One open WebSocket connection to the API.
///
/// The read and write halves are locked separately, so a task blocked in
/// [`recv`](Self::recv) doesn't stop another from sending pings.
pub struct WebSocketConnection {
    id: ConnectionId,
    sink: Arc<Mutex<SplitSink<WsStream, Message>>>,
    stream: Arc<Mutex<SplitStream<WsStream>>>,
}

impl WebSocketConnection {
    /// Opens a connection to `url` (`ws://` or `wss://`) with the given
    /// extra handshake headers.
    pub async fn connect(
        url: &str,
        headers: &[(String, String)],
    ) -> Result<Self, TransportError> {
        let mut request = url.into_client_request()?;
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
            request.headers_mut().insert(name, value);
        }

        let (ws, _response) = tokio_tungstenite::connect_async(request).await?;
        let (sink, stream) = ws.split();

        let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, url, "websocket connected");

        Ok(Self {
            id,
            sink: Arc::new(Mutex::new(sink)),
            stream: Arc::new(Mutex::new(stream)),
        })
    }

    /// Returns the unique identifier for this connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Sends a text frame.
    pub async fn send_text(&self, text: &str) -> Result<(), TransportError> {
        self.sink
            .lock()
            .await
            .send(Message::text(text.to_string()))
            .await
            .map_err(TransportError::from)
    }

    /// Sends a ping frame.
    pub async fn ping(&self) -> Result<(), TransportError> {
        self.sink
            .lock()
            .await
            .send(Message::Ping(Vec::new().into()))
            .await
            .map_err(TransportError::from)
    }

    /// Receives the next data frame.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    /// Ping, pong, and raw frames are skipped.
    pub async fn recv(&self) -> Result<Option<Vec<u8>>, TransportError> {
        loop {
            let msg = self.stream.lock().await.next().await;
            match msg {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Binary(data))) => return Ok(Some(data.into())),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(TransportError::from(e)),
            }
        }
    }

    /// Closes the connection with a "going away" close frame.
    pub async fn close(&self) -> Result<(), TransportError> {
        let frame = CloseFrame {
            code: CloseCode::Away,
            reason: String::new().into(),
        };
        self.sink
            .lock()
            .await
            .send(Message::Close(Some(frame)))
            .await
            .map_err(TransportError::from)
    }
}
