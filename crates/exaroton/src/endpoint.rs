//! Endpoint descriptions.
//!
//! An [`Endpoint`] is everything needed to issue one API call except the
//! session-wide parts (base URL, token, user agent): the verb, the
//! resource path, an optional body with its content type, and a phrase
//! naming the operation for error messages.
//!
//! ```text
//! Endpoint::get(ResourcePath::ram(id), "getting your server's ram")
//!     └─ Session::enveloped::<RamData>()  → RamData | ExarotonError
//! ```

use exaroton_protocol::{Codec, JsonCodec, ProtocolError, ResourcePath};
use exaroton_transport::{Method, RequestBody};
use serde::Serialize;

/// `Content-Type` for JSON request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// `Content-Type` that tells the files endpoint to create a directory.
pub const CONTENT_TYPE_DIRECTORY: &str = "inode/directory";

/// One API call, not yet bound to a session.
#[derive(Debug)]
pub struct Endpoint {
    pub(crate) method: Method,
    pub(crate) path: ResourcePath,
    pub(crate) operation: String,
    pub(crate) body: RequestBody,
    pub(crate) content_type: Option<&'static str>,
}

impl Endpoint {
    /// Describes a call with `method` on `path`.
    ///
    /// `operation` completes the phrase "an error occurred while ...".
    pub fn new(method: Method, path: ResourcePath, operation: impl Into<String>) -> Self {
        Self {
            method,
            path,
            operation: operation.into(),
            body: RequestBody::Empty,
            content_type: None,
        }
    }

    pub fn get(path: ResourcePath, operation: impl Into<String>) -> Self {
        Self::new(Method::Get, path, operation)
    }

    pub fn post(path: ResourcePath, operation: impl Into<String>) -> Self {
        Self::new(Method::Post, path, operation)
    }

    pub fn put(path: ResourcePath, operation: impl Into<String>) -> Self {
        Self::new(Method::Put, path, operation)
    }

    pub fn delete(path: ResourcePath, operation: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, operation)
    }

    /// Attaches `value` as a JSON body.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if `value` can't be serialized.
    pub fn json<B: Serialize>(self, value: &B) -> Result<Self, ProtocolError> {
        let bytes = JsonCodec.encode(value)?;
        Ok(self
            .body(RequestBody::Bytes(bytes))
            .content_type(CONTENT_TYPE_JSON))
    }

    /// Sets the body as-is.
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the `Content-Type` header.
    pub fn content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exaroton_protocol::RamData;

    #[tokio::test]
    async fn test_json_body_sets_content_type() {
        let endpoint = Endpoint::post(ResourcePath::ram("abc"), "setting ram")
            .json(&RamData { ram: 6 })
            .unwrap();
        assert_eq!(endpoint.method, Method::Post);
        assert_eq!(endpoint.content_type, Some(CONTENT_TYPE_JSON));
        assert_eq!(endpoint.body.into_bytes().await.unwrap(), br#"{"ram":6}"#);
    }

    #[test]
    fn test_new_endpoint_has_no_body() {
        let endpoint = Endpoint::get(ResourcePath::account(), "getting account info");
        assert!(matches!(endpoint.body, RequestBody::Empty));
        assert_eq!(endpoint.content_type, None);
        assert_eq!(endpoint.operation, "getting account info");
        assert_eq!(endpoint.path.to_string(), "account");
    }
}
