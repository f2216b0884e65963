//! Resource paths: how every endpoint URL is assembled.
//!
//! The API is a regular tree:
//!
//! ```text
//! account
//! servers
//! └── {id}
//!     ├── logs ── share
//!     ├── options ── motd | ram
//!     ├── start | stop | restart | command | websocket
//!     ├── playerlists ── {list}
//!     └── files ── info | data ── {path}
//! ```
//!
//! A [`ResourcePath`] is an ordered list of [`Segment`]s, each either a
//! fixed literal or a caller-supplied parameter. Rendering walks the list
//! root to leaf and joins the resolved segments with `/`. Parameters are
//! percent-encoded as a single segment, so a file path such as
//! `configs/server.properties` becomes `configs%2Fserver.properties`.
//!
//! Endpoint constructors ([`ResourcePath::server`],
//! [`ResourcePath::file_info`], ...) are built by composition, so every
//! endpoint's path is assembled the same way.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as-is inside a parameter: RFC 3986 "unreserved".
/// Everything else, `/` included, is percent-encoded.
const PARAM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The literal path components the API uses.
pub mod segment {
    pub const ACCOUNT: &str = "account";
    pub const SERVERS: &str = "servers";
    pub const LOGS: &str = "logs";
    pub const SHARE: &str = "share";
    pub const OPTIONS: &str = "options";
    pub const MOTD: &str = "motd";
    pub const RAM: &str = "ram";
    pub const START: &str = "start";
    pub const STOP: &str = "stop";
    pub const RESTART: &str = "restart";
    pub const COMMAND: &str = "command";
    pub const PLAYER_LISTS: &str = "playerlists";
    pub const FILES: &str = "files";
    pub const INFO: &str = "info";
    pub const DATA: &str = "data";
    pub const WEBSOCKET: &str = "websocket";
}

/// One component of a [`ResourcePath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A fixed component such as `servers` or `options`.
    Literal(&'static str),
    /// A caller-supplied value such as a server id or file path.
    /// Stored raw; encoded when the path is rendered.
    Param(String),
}

impl Segment {
    fn write_to(&self, out: &mut String) {
        match self {
            Self::Literal(literal) => out.push_str(literal),
            Self::Param(value) => {
                out.extend(utf8_percent_encode(value, PARAM_ENCODE_SET));
            }
        }
    }
}

/// An endpoint path relative to the API base (`https://api.exaroton.com/v1/`).
///
/// ```rust
/// use exaroton_protocol::ResourcePath;
///
/// let path = ResourcePath::file_info("abc123", "configs/server.properties");
/// assert_eq!(
///     path.to_string(),
///     "servers/abc123/files/info/configs%2Fserver.properties",
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<Segment>,
}

impl ResourcePath {
    /// An empty path (the API root).
    pub fn root() -> Self {
        Self::default()
    }

    /// Appends a literal segment.
    pub fn join(mut self, literal: &'static str) -> Self {
        self.segments.push(Segment::Literal(literal));
        self
    }

    /// Appends a parameter segment.
    pub fn param(mut self, value: impl Into<String>) -> Self {
        self.segments.push(Segment::Param(value.into()));
        self
    }

    /// The segments, root first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    // -- Top level --

    /// `account`
    pub fn account() -> Self {
        Self::root().join(segment::ACCOUNT)
    }

    /// `servers`
    pub fn servers() -> Self {
        Self::root().join(segment::SERVERS)
    }

    /// `servers/{id}`, with `id` passed through [`clean_server_id`].
    pub fn server(id: &str) -> Self {
        Self::servers().param(clean_server_id(id))
    }

    // -- Server children --

    /// `servers/{id}/logs`
    pub fn logs(id: &str) -> Self {
        Self::server(id).join(segment::LOGS)
    }

    /// `servers/{id}/logs/share`
    pub fn share_logs(id: &str) -> Self {
        Self::logs(id).join(segment::SHARE)
    }

    /// `servers/{id}/options/motd`
    pub fn motd(id: &str) -> Self {
        Self::server(id).join(segment::OPTIONS).join(segment::MOTD)
    }

    /// `servers/{id}/options/ram`
    pub fn ram(id: &str) -> Self {
        Self::server(id).join(segment::OPTIONS).join(segment::RAM)
    }

    /// `servers/{id}/start`
    pub fn start(id: &str) -> Self {
        Self::server(id).join(segment::START)
    }

    /// `servers/{id}/stop`
    pub fn stop(id: &str) -> Self {
        Self::server(id).join(segment::STOP)
    }

    /// `servers/{id}/restart`
    pub fn restart(id: &str) -> Self {
        Self::server(id).join(segment::RESTART)
    }

    /// `servers/{id}/command`
    pub fn command(id: &str) -> Self {
        Self::server(id).join(segment::COMMAND)
    }

    /// `servers/{id}/playerlists`
    pub fn player_lists(id: &str) -> Self {
        Self::server(id).join(segment::PLAYER_LISTS)
    }

    /// `servers/{id}/playerlists/{list}`
    pub fn player_list(id: &str, list: &str) -> Self {
        Self::player_lists(id).param(list)
    }

    /// `servers/{id}/files/info/{path}`, path normalized.
    pub fn file_info(id: &str, path: &str) -> Self {
        Self::server(id)
            .join(segment::FILES)
            .join(segment::INFO)
            .param(normalize_file_path(path))
    }

    /// `servers/{id}/files/data/{path}`, path normalized.
    pub fn file_data(id: &str, path: &str) -> Self {
        Self::server(id)
            .join(segment::FILES)
            .join(segment::DATA)
            .param(normalize_file_path(path))
    }

    /// `servers/{id}/websocket`
    pub fn websocket(id: &str) -> Self {
        Self::server(id).join(segment::WEBSOCKET)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('/');
            }
            segment.write_to(&mut out);
        }
        f.write_str(&out)
    }
}

/// Normalizes a server id before it goes into a path.
///
/// Ids are short case-sensitive alphanumeric strings; anything else a
/// caller may have pasted along (whitespace, a leading `#`, separators)
/// is dropped. Idempotent.
pub fn clean_server_id(id: &str) -> String {
    id.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Strips leading slashes from a remote file path. Idempotent.
pub fn normalize_file_path(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}
