//! Codec trait and implementations for serializing/deserializing payloads.
//!
//! The client doesn't care HOW bodies are serialized, only that something
//! implements [`Codec`]. Request bodies are encoded as the plain domain
//! object (no envelope); responses are decoded into an
//! [`Envelope`](crate::Envelope) around the expected payload type.

use serde::{Serialize, de::DeserializeOwned};

use crate::{Envelope, ProtocolError};

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because the codec lives inside the shared
/// client session and inside the websocket reader task.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;

    /// Decodes a `{success, error, data}` response wrapper.
    ///
    /// A decode failure here is a [`ProtocolError`], never an API error:
    /// whether the envelope carries a payload is decided afterwards by
    /// [`Envelope::into_data`].
    fn decode_envelope<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<Envelope<T>, ProtocolError> {
        self.decode(data)
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// The exaroton API speaks UTF-8 JSON exclusively, so this is the codec
/// the client uses. It is behind the `json` feature flag (enabled by
/// default).
///
/// ## Example
///
/// ```rust
/// use exaroton_protocol::{Codec, JsonCodec, RamData};
///
/// let codec = JsonCodec;
///
/// let bytes = codec.encode(&RamData { ram: 4 }).unwrap();
/// assert_eq!(bytes, br#"{"ram":4}"#);
///
/// let envelope = codec
///     .decode_envelope::<RamData>(br#"{"success":true,"error":null,"data":{"ram":4}}"#)
///     .unwrap();
/// assert_eq!(envelope.data, Some(RamData { ram: 4 }));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
