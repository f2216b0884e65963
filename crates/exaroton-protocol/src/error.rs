//! Error types for the protocol layer.
//!
//! Two kinds of failure live here. [`ProtocolError`] means the bytes
//! themselves were wrong: they could not be encoded or decoded, or a
//! decoded value fell outside what the wire format allows. [`ApiError`]
//! means the bytes were fine but the API said "no": the envelope came
//! back without a payload, or a raw endpoint answered with a non-200
//! status.

/// Errors that can occur while encoding or decoding wire data.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields, or a
    /// payload whose shape doesn't match the requested type.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A server status code outside the known set.
    ///
    /// Code 9 is deliberately absent from the API's numbering and lands
    /// here too.
    #[error("unknown server status code {0}")]
    UnknownStatus(i64),
}

/// The API answered, but not with what the operation needed.
///
/// Produced in two situations:
///
/// - an enveloped response whose `data` is `null` (the message is the
///   envelope's `error` field, if the server sent one), or
/// - a raw-status endpoint (file content, uploads, deletes) that didn't
///   answer `200 OK`. Those bodies are discarded, so only the status is
///   kept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "an error occurred while {operation}{}{}",
    status_suffix(.status),
    message_suffix(.message)
)]
pub struct ApiError {
    /// What the client was doing, phrased to follow "an error occurred
    /// while ...", e.g. `"getting account info"`.
    pub operation: String,
    /// The server-supplied error message, if any.
    pub message: Option<String>,
    /// The HTTP status, when it was the reason for the failure.
    pub status: Option<u16>,
}

impl ApiError {
    /// Creates an error for `operation` with an optional server message.
    pub fn new(operation: impl Into<String>, message: Option<String>) -> Self {
        Self {
            operation: operation.into(),
            message,
            status: None,
        }
    }

    /// Attaches the HTTP status that caused the failure.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|status| format!(" (HTTP {status})")).unwrap_or_default()
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_ref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}
