//! Live server status over the websocket.
//!
//! [`Server::subscribe`](crate::Server::subscribe) opens
//! `servers/{id}/websocket` and hands back a [`Subscription`]. A
//! background task owns the read loop:
//!
//! ```text
//!   ┌──────── ping every ping_interval ────────┐
//!   │                                          ▼
//! task ◄── frames ── WebSocketConnection ──► API
//!   │
//!   └── ServerEvent ──► mpsc ──► Subscription::recv()
//! ```
//!
//! The task ends when the API closes the socket, on the first transport
//! error, or when [`Subscription::unsubscribe`] is called. Dropping the
//! handle stops the task as well.

use std::fmt;
use std::sync::Arc;

use exaroton_protocol::stream::frame;
use exaroton_protocol::{Codec, ProtocolError, ResourcePath, ServerData, StreamMessage};
use exaroton_transport::{HttpTransport, ReqwestTransport, WebSocketConnection};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use crate::entities::Server;
use crate::session::Session;
use crate::ExarotonError;

/// Something that happened on a subscribed server.
pub enum ServerEvent<T = ReqwestTransport> {
    /// The websocket handshake completed.
    Connected,
    /// The API is ready to stream.
    Ready,
    /// Keep-alive from the API.
    KeepAlive,
    /// The API is closing the websocket.
    Disconnected,
    /// The server changed; carries the new snapshot.
    Status(Server<T>),
    /// Any other frame, passed through as received.
    Other(StreamMessage),
}

impl<T> fmt::Debug for ServerEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => f.write_str("Connected"),
            Self::Ready => f.write_str("Ready"),
            Self::KeepAlive => f.write_str("KeepAlive"),
            Self::Disconnected => f.write_str("Disconnected"),
            Self::Status(server) => f.debug_tuple("Status").field(server).finish(),
            Self::Other(message) => f.debug_tuple("Other").field(message).finish(),
        }
    }
}

type EventSender<T> = mpsc::UnboundedSender<Result<ServerEvent<T>, ExarotonError>>;

/// Handle to an open websocket session for one server.
pub struct Subscription<T = ReqwestTransport> {
    server_id: String,
    connection: Arc<WebSocketConnection>,
    events: mpsc::UnboundedReceiver<Result<ServerEvent<T>, ExarotonError>>,
    task: Option<JoinHandle<()>>,
}

impl<T: HttpTransport> Subscription<T> {
    pub(crate) async fn open(
        session: Arc<Session<T>>,
        server_id: &str,
    ) -> Result<Self, ExarotonError> {
        let url = format!(
            "{}{}",
            session.config().websocket_base_url(),
            ResourcePath::websocket(server_id)
        );
        let connection =
            Arc::new(WebSocketConnection::connect(&url, &session.default_headers()).await?);
        tracing::debug!(server_id, connection = %connection.id(), "websocket session opened");

        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(session, Arc::clone(&connection), tx));

        Ok(Self {
            server_id: server_id.to_string(),
            connection,
            events: rx,
            task: Some(task),
        })
    }
}

impl<T> Subscription<T> {
    /// The subscribed server's id.
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    /// `true` while the background task is still reading.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the session has ended and every buffered event
    /// has been handed out.
    pub async fn recv(&mut self) -> Option<Result<ServerEvent<T>, ExarotonError>> {
        self.events.recv().await
    }

    /// Closes the websocket with a "going away" frame.
    ///
    /// # Errors
    /// `State` if the session already ended or was unsubscribed before.
    pub async fn unsubscribe(&mut self) -> Result<(), ExarotonError> {
        let task = match self.task.take() {
            Some(task) if !task.is_finished() => task,
            _ => {
                return Err(ExarotonError::State(
                    "no websocket connection active".to_string(),
                ));
            }
        };
        task.abort();
        self.connection.close().await?;
        tracing::debug!(server_id = %self.server_id, "websocket session closed");
        Ok(())
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("server_id", &self.server_id)
            .field("connection", &self.connection.id())
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Background task
// ---------------------------------------------------------------------------

async fn run<T: HttpTransport>(
    session: Arc<Session<T>>,
    connection: Arc<WebSocketConnection>,
    events: EventSender<T>,
) {
    let period = session.config().ping_interval;
    let mut ping = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = ping.tick() => {
                if let Err(e) = connection.ping().await {
                    let _ = events.send(Err(e.into()));
                    break;
                }
                tracing::trace!(connection = %connection.id(), "ping sent");
            }
            frame = connection.recv() => match frame {
                Ok(Some(bytes)) => {
                    if events.send(decode_event(&session, &bytes)).is_err() {
                        // Handle dropped.
                        break;
                    }
                }
                Ok(None) => {
                    tracing::debug!(connection = %connection.id(), "websocket closed by server");
                    break;
                }
                Err(e) => {
                    let _ = events.send(Err(e.into()));
                    break;
                }
            }
        }
    }
}

fn decode_event<T>(
    session: &Arc<Session<T>>,
    bytes: &[u8],
) -> Result<ServerEvent<T>, ExarotonError>
where
    T: HttpTransport,
{
    let mut message: StreamMessage = session.codec().decode(bytes)?;
    tracing::trace!(kind = %message.kind, stream = ?message.stream, "frame received");

    let event = match message.kind.as_str() {
        frame::CONNECTED => ServerEvent::Connected,
        frame::READY => ServerEvent::Ready,
        frame::KEEP_ALIVE => ServerEvent::KeepAlive,
        frame::DISCONNECTED => ServerEvent::Disconnected,
        frame::STATUS => match message.data.take() {
            Some(data) => {
                let data: ServerData =
                    serde_json::from_value(data).map_err(ProtocolError::Decode)?;
                ServerEvent::Status(Server::from_data(Arc::clone(session), data, true)?)
            }
            None => ServerEvent::Other(message),
        },
        _ => ServerEvent::Other(message),
    };
    Ok(event)
}
