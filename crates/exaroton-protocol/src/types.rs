//! Wire payloads: the `data` part of each envelope, and request bodies.
//!
//! These are plain serde structs mirroring the JSON the API sends and
//! expects. The client crate wraps them in read-only entities; nothing
//! here issues requests.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// `GET account`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountData {
    pub name: String,
    pub email: String,
    /// Whether the account's email address was verified.
    pub verified: bool,
    /// Remaining credit balance.
    pub credits: f64,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// A server as returned by `GET servers` and `GET servers/{id}`, and as
/// pushed in websocket `status` frames.
///
/// `status` stays a raw integer here; the client validates it into a
/// [`ServerStatus`](crate::ServerStatus) when it builds the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerData {
    pub id: String,
    pub name: String,
    /// Full address, e.g. `example.exaroton.me`.
    pub address: String,
    pub motd: String,
    pub status: i64,
    /// Only set while the server is online.
    #[serde(default)]
    pub host: Option<String>,
    /// Only set while the server is online.
    #[serde(default)]
    pub port: Option<u16>,
    pub players: PlayerInfoData,
    /// `None` when no software is installed yet.
    #[serde(default)]
    pub software: Option<SoftwareData>,
    /// Whether the server is reached through Share Access.
    pub shared: bool,
}

/// Player counts embedded in [`ServerData`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfoData {
    pub max: u32,
    pub count: u32,
    /// Names of the players currently online, in server order.
    #[serde(default)]
    pub list: Vec<String>,
}

/// Installed server software.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareData {
    pub id: String,
    pub name: String,
    pub version: String,
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// `servers/{id}/options/motd`, both as payload and as request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotdData {
    pub motd: String,
}

/// `servers/{id}/options/ram`, both as payload and as request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamData {
    /// RAM in GB.
    pub ram: u32,
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Body of `POST servers/{id}/start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartData {
    /// Bill the API key owner instead of the server owner.
    pub use_own_credits: bool,
}

/// Body of `POST servers/{id}/command`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandData {
    pub command: String,
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

/// `GET servers/{id}/logs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsData {
    /// The whole log as one string. `null` when the server has no log yet.
    #[serde(default)]
    pub content: Option<String>,
}

/// `GET servers/{id}/logs/share`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLogsData {
    pub id: String,
    pub url: String,
    /// URL of the raw log text.
    pub raw: String,
}

// ---------------------------------------------------------------------------
// Player lists
// ---------------------------------------------------------------------------

/// Body of `PUT`/`DELETE servers/{id}/playerlists/{list}`.
///
/// `entries: None` and `entries: Some(vec![])` are different values: the
/// first means "no entries were given", the second "an empty list".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerListData {
    #[serde(default)]
    pub entries: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// `GET servers/{id}/files/info/{path}`
///
/// Directories carry `children`; plain files don't.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfoData {
    pub path: String,
    pub name: String,
    pub is_text_file: bool,
    pub is_config_file: bool,
    pub is_directory: bool,
    pub is_log: bool,
    pub is_readable: bool,
    pub is_writable: bool,
    /// Size in bytes.
    pub size: u64,
    #[serde(default)]
    pub children: Option<Vec<FileInfoData>>,
}
