//! The uniform response wrapper.
//!
//! Every enveloped endpoint answers with the same outer shape:
//!
//! ```text
//! { "success": bool, "error": string | null, "data": <payload> | null }
//! ```
//!
//! Whether a call succeeded is decided by `data` alone. A response with
//! `"success": true` but `"data": null` is still a failure for any
//! operation that expects a payload.

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// A decoded `{success, error, data}` response.
///
/// `error` and `data` default to `None` when the field is missing
/// entirely, so a terse `{"success": false}` still decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The server's own success flag. Informational only.
    pub success: bool,

    /// Human-readable error message, present on failures.
    #[serde(default)]
    pub error: Option<String>,

    /// The payload. Absent on failures.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, or fails with the server's error message.
    ///
    /// `operation` names what the caller was doing and ends up in the
    /// error's display text when the server didn't send a message.
    ///
    /// # Errors
    /// Returns [`ApiError`] whenever `data` is absent, regardless of the
    /// `success` flag.
    pub fn into_data(self, operation: &str) -> Result<T, ApiError> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(ApiError::new(operation, self.error)),
        }
    }

    /// Checks an acknowledgement-style response, one that carries no
    /// payload worth keeping (start, stop, restart, command).
    ///
    /// # Errors
    /// Returns [`ApiError`] when `error` is set or `success` is false.
    pub fn acknowledge(self, operation: &str) -> Result<(), ApiError> {
        if self.error.is_some() || !self.success {
            return Err(ApiError::new(operation, self.error));
        }
        Ok(())
    }
}
