//! Websocket frames on `servers/{id}/websocket`.
//!
//! Every frame is a JSON text message:
//!
//! ```text
//! { "type": "status", "stream": "status", "data": { ...server... } }
//! ```
//!
//! `type` says what happened; `stream` names the sub-stream (status,
//! console, tick, ...) the frame belongs to; `data` is type-dependent.

use serde::{Deserialize, Serialize};

/// Frame types the server sends on its own, without a stream.
pub mod frame {
    pub const CONNECTED: &str = "connected";
    pub const DISCONNECTED: &str = "disconnected";
    pub const READY: &str = "ready";
    pub const KEEP_ALIVE: &str = "keep-alive";
    pub const STATUS: &str = "status";
}

/// One websocket frame, in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamMessage {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl StreamMessage {
    /// A frame with only a type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            stream: None,
            data: None,
        }
    }

    /// Returns `true` if this frame's type is `kind`.
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}
