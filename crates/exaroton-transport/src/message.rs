//! Transport-neutral request and response types.

use std::fmt;

use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::TransportError;

/// A body streamed in chunks.
pub type ByteStream = BoxStream<'static, Result<Vec<u8>, TransportError>>;

/// Chunk size used when turning an `AsyncRead` into a [`ByteStream`].
const READ_CHUNK_SIZE: usize = 16 * 1024;

/// The HTTP verbs the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request body.
pub enum RequestBody {
    /// No body at all.
    Empty,
    /// A body held in memory (JSON, UTF-8 text).
    Bytes(Vec<u8>),
    /// A body streamed from a file or reader.
    Stream(ByteStream),
}

impl RequestBody {
    /// Streams an `AsyncRead` as the body, chunk by chunk.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self::Stream(reader_stream(reader))
    }

    /// Collects the body into memory.
    pub async fn into_bytes(self) -> Result<Vec<u8>, TransportError> {
        match self {
            Self::Empty => Ok(Vec::new()),
            Self::Bytes(bytes) => Ok(bytes),
            Self::Stream(stream) => collect(stream).await,
        }
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            Self::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// One outgoing HTTP request.
///
/// Headers are captured when the request is built; a token change
/// afterwards does not affect a request that already exists.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Returns the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A received HTTP response. The body has not been read yet.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: ByteStream,
}

impl HttpResponse {
    /// A response with a body already in memory.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self {
            status,
            headers: Vec::new(),
            body: stream::once(async move { Ok(body) }).boxed(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// `true` for `200 OK` exactly.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Reads the whole body.
    pub async fn bytes(self) -> Result<Vec<u8>, TransportError> {
        collect(self.body).await
    }

    /// Reads the whole body as UTF-8, replacing invalid sequences.
    pub async fn text(self) -> Result<String, TransportError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Hands over the body stream without buffering it.
    pub fn into_stream(self) -> ByteStream {
        self.body
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Turns an `AsyncRead` into a chunked [`ByteStream`].
pub fn reader_stream<R>(reader: R) -> ByteStream
where
    R: AsyncRead + Send + Unpin + 'static,
{
    stream::try_unfold(reader, |mut reader| async move {
        let mut buf = vec![0u8; READ_CHUNK_SIZE];
        let n = reader.read(&mut buf).await.map_err(TransportError::Body)?;
        if n == 0 {
            return Ok::<_, TransportError>(None);
        }
        buf.truncate(n);
        Ok(Some((buf, reader)))
    })
    .boxed()
}

async fn collect(stream: ByteStream) -> Result<Vec<u8>, TransportError> {
    stream
        .try_fold(Vec::new(), |mut acc, chunk| async move {
            acc.extend_from_slice(&chunk);
            Ok(acc)
        })
        .await
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
