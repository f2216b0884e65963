//! Unified error type for the exaroton client.

use std::path::PathBuf;

use exaroton_protocol::{ApiError, ProtocolError};
use exaroton_transport::TransportError;

/// Top-level error returned by every client operation.
///
/// Sub-crate errors convert with `?`. The one exception is
/// [`ProtocolError::UnknownStatus`], which becomes [`Validation`](Self::Validation):
/// an out-of-range status code is a rejected value, not a malformed body.
#[derive(Debug, thiserror::Error)]
pub enum ExarotonError {
    /// The API answered without the payload the operation needed, or a
    /// raw endpoint answered with something other than `200 OK`.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A local precondition failed before (or instead of) a request.
    #[error("invalid value: {0}")]
    Validation(String),

    /// Reading or writing a local file failed during a download or upload.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The operation isn't valid in the current local state.
    #[error("invalid state: {0}")]
    State(String),

    /// Connection, TLS, or timeout failures from the transport.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body could not be encoded or decoded.
    #[error(transparent)]
    Protocol(ProtocolError),
}

impl From<ProtocolError> for ExarotonError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::UnknownStatus(_) => Self::Validation(err.to_string()),
            other => Self::Protocol(other),
        }
    }
}

impl ExarotonError {
    /// Wraps a local I/O failure together with the path involved.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}
