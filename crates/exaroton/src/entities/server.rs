//! The `Server` entity and its endpoint operations.

use std::fmt;
use std::sync::Arc;

use exaroton_protocol::{
    CommandData, LogsData, MotdData, PlayerInfoData, RamData, ResourcePath, ServerData,
    ServerStatus, ShareLogsData, SoftwareData, StartData,
};
use exaroton_transport::{HttpTransport, ReqwestTransport};

use crate::endpoint::Endpoint;
use crate::entities::{File, Logs, PlayerList, Ram, ShareLogs};
use crate::session::Session;
use crate::subscription::Subscription;
use crate::ExarotonError;

// ---------------------------------------------------------------------------
// PlayerInfo / Software
// ---------------------------------------------------------------------------

/// Player counts and names, as of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    max: u32,
    count: u32,
    list: Vec<String>,
}

impl PlayerInfo {
    fn from_data(data: PlayerInfoData) -> Self {
        Self {
            max: data.max,
            count: data.count,
            list: data.list,
        }
    }

    /// Maximum number of players.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Players currently online.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Names of the players currently online.
    pub fn list(&self) -> &[String] {
        &self.list
    }
}

/// The software (Vanilla, Paper, Forge, ...) a server runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Software {
    id: String,
    name: String,
    version: String,
}

impl Software {
    fn from_data(data: SoftwareData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            version: data.version,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// A snapshot of one server.
///
/// Fields reflect the moment the snapshot was fetched; the status does
/// not follow the real server. Call [`refresh`](Self::refresh) for a new
/// snapshot or [`subscribe`](Self::subscribe) for live updates.
pub struct Server<T = ReqwestTransport> {
    session: Arc<Session<T>>,
    id: String,
    name: String,
    address: String,
    motd: String,
    status: ServerStatus,
    host: Option<String>,
    port: Option<u16>,
    players: PlayerInfo,
    software: Option<Software>,
    shared: bool,
    fetched: bool,
}

impl<T> Clone for Server<T> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            id: self.id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            motd: self.motd.clone(),
            status: self.status,
            host: self.host.clone(),
            port: self.port,
            players: self.players.clone(),
            software: self.software.clone(),
            shared: self.shared,
            fetched: self.fetched,
        }
    }
}

impl<T> fmt::Debug for Server<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("address", &self.address)
            .field("status", &self.status)
            .field("players", &self.players)
            .field("software", &self.software)
            .field("shared", &self.shared)
            .field("fetched", &self.fetched)
            .finish_non_exhaustive()
    }
}

impl<T> Server<T> {
    /// Builds a snapshot from a payload.
    ///
    /// # Errors
    /// `Validation` if the payload's status code is not a known state.
    pub(crate) fn from_data(
        session: Arc<Session<T>>,
        data: ServerData,
        fetched: bool,
    ) -> Result<Self, ExarotonError> {
        Ok(Self {
            session,
            status: ServerStatus::from_code(data.status)?,
            id: data.id,
            name: data.name,
            address: data.address,
            motd: data.motd,
            host: data.host,
            port: data.port,
            players: PlayerInfo::from_data(data.players),
            software: data.software.map(Software::from_data),
            shared: data.shared,
            fetched,
        })
    }

    /// Unique server id.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full address, e.g. `example.exaroton.me`.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// MOTD as of the snapshot.
    pub fn motd(&self) -> &str {
        &self.motd
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    /// `true` if the snapshot's status is any of `statuses`.
    pub fn has_status(&self, statuses: &[ServerStatus]) -> bool {
        statuses.contains(&self.status)
    }

    /// Host name, only set while the server is online.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Port, only set while the server is online.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn players(&self) -> &PlayerInfo {
        &self.players
    }

    /// `None` when no software is installed yet.
    pub fn software(&self) -> Option<&Software> {
        self.software.as_ref()
    }

    /// Whether the server is shared with the token's account rather than
    /// owned by it.
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Whether this snapshot came from fetching the server itself, as
    /// opposed to an entry in the server list.
    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    /// A handle for `path` without fetching its information first.
    ///
    /// Use this to address paths that don't exist yet, e.g. before
    /// [`File::upload`] or [`File::create_as_directory`].
    pub fn file(&self, path: &str) -> File<T> {
        File::unfetched(Arc::clone(&self.session), self.id.clone(), path)
    }
}

impl<T: HttpTransport> Server<T> {
    /// Fetches a new snapshot of this server.
    pub async fn refresh(&self) -> Result<Server<T>, ExarotonError> {
        let data: ServerData = self
            .session
            .enveloped(Endpoint::get(
                ResourcePath::server(&self.id),
                "fetching your server",
            ))
            .await?;
        Server::from_data(Arc::clone(&self.session), data, true)
    }

    /// Fetches the current MOTD.
    pub async fn fetch_motd(&self) -> Result<String, ExarotonError> {
        let data: MotdData = self
            .session
            .enveloped(Endpoint::get(
                ResourcePath::motd(&self.id),
                "fetching the motd of your server",
            ))
            .await?;
        Ok(data.motd)
    }

    /// Sets a new MOTD and returns the one the API stored.
    pub async fn set_motd(&self, motd: &str) -> Result<String, ExarotonError> {
        let endpoint = Endpoint::post(ResourcePath::motd(&self.id), "setting a new motd")
            .json(&MotdData {
                motd: motd.to_string(),
            })?;
        let data: MotdData = self.session.enveloped(endpoint).await?;
        Ok(data.motd)
    }

    /// Fetches the server's current log.
    pub async fn get_logs(&self) -> Result<Logs, ExarotonError> {
        let data: LogsData = self
            .session
            .enveloped(Endpoint::get(
                ResourcePath::logs(&self.id),
                "getting your server logs",
            ))
            .await?;
        Ok(Logs::from_data(data))
    }

    /// Uploads the log to the paste service and returns its links.
    pub async fn share_logs(&self) -> Result<ShareLogs, ExarotonError> {
        let data: ShareLogsData = self
            .session
            .enveloped(Endpoint::get(
                ResourcePath::share_logs(&self.id),
                "uploading your logs",
            ))
            .await?;
        Ok(ShareLogs::from_data(data))
    }

    pub async fn get_ram(&self) -> Result<Ram, ExarotonError> {
        let data: RamData = self
            .session
            .enveloped(Endpoint::get(
                ResourcePath::ram(&self.id),
                "getting your server's ram",
            ))
            .await?;
        Ok(Ram::from_data(data))
    }

    /// Sets the RAM size in GB.
    ///
    /// # Errors
    /// `Validation`, without any request, if `gb` is outside
    /// [`MIN_RAM`](crate::MIN_RAM)`..=`[`MAX_RAM`](crate::MAX_RAM).
    pub async fn set_ram(&self, gb: u32) -> Result<Ram, ExarotonError> {
        let body = Ram::validate(gb)?;
        let endpoint = Endpoint::post(
            ResourcePath::ram(&self.id),
            "updating your server's RAM size",
        )
        .json(&body)?;
        let data: RamData = self.session.enveloped(endpoint).await?;
        Ok(Ram::from_data(data))
    }

    /// Starts the server.
    pub async fn start(&self) -> Result<(), ExarotonError> {
        self.session
            .acknowledged(Endpoint::get(
                ResourcePath::start(&self.id),
                "starting the server",
            ))
            .await
    }

    /// Starts the server, billing the token's account when
    /// `use_own_credits` is set.
    pub async fn start_with_own_credits(&self, use_own_credits: bool) -> Result<(), ExarotonError> {
        let endpoint = Endpoint::post(ResourcePath::start(&self.id), "starting the server")
            .json(&StartData { use_own_credits })?;
        self.session.acknowledged(endpoint).await
    }

    pub async fn stop(&self) -> Result<(), ExarotonError> {
        self.session
            .acknowledged(Endpoint::get(
                ResourcePath::stop(&self.id),
                "stopping your server",
            ))
            .await
    }

    pub async fn restart(&self) -> Result<(), ExarotonError> {
        self.session
            .acknowledged(Endpoint::get(
                ResourcePath::restart(&self.id),
                "restarting your server",
            ))
            .await
    }

    /// Runs a console command on the server.
    pub async fn execute_command(&self, command: &str) -> Result<(), ExarotonError> {
        let endpoint = Endpoint::post(ResourcePath::command(&self.id), "executing the command")
            .json(&CommandData {
                command: command.to_string(),
            })?;
        self.session.acknowledged(endpoint).await
    }

    /// Names of the server's player lists (`whitelist`, `ops`, ...).
    pub async fn get_player_lists(&self) -> Result<Vec<String>, ExarotonError> {
        self.session
            .enveloped(Endpoint::get(
                ResourcePath::player_lists(&self.id),
                "getting the player lists",
            ))
            .await
    }

    /// Fetches one player list with its entries.
    pub async fn get_player_list(&self, name: &str) -> Result<PlayerList<T>, ExarotonError> {
        let entries: Vec<String> = self
            .session
            .enveloped(Endpoint::get(
                ResourcePath::player_list(&self.id, name),
                format!("getting the {name} player list"),
            ))
            .await?;
        Ok(PlayerList::new(
            Arc::clone(&self.session),
            self.id.clone(),
            name.to_string(),
            Some(entries),
        ))
    }

    /// Fetches information about a file or directory. Use `"/"` for the
    /// server's root directory.
    pub async fn get_file(&self, path: &str) -> Result<File<T>, ExarotonError> {
        File::fetch(Arc::clone(&self.session), &self.id, path).await
    }

    /// Opens a websocket for live status updates.
    ///
    /// The returned handle owns the connection; close it with
    /// [`Subscription::unsubscribe`].
    pub async fn subscribe(&self) -> Result<Subscription<T>, ExarotonError> {
        Subscription::open(Arc::clone(&self.session), &self.id).await
    }
}

impl<T> fmt::Display for Server<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.name, self.address, self.status)
    }
}
