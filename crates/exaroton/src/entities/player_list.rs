use std::fmt;
use std::sync::Arc;

use exaroton_protocol::{PlayerListData, ResourcePath};
use exaroton_transport::{HttpTransport, ReqwestTransport};

use crate::endpoint::Endpoint;
use crate::session::Session;
use crate::ExarotonError;

/// One of a server's player lists, e.g. `whitelist` or `ops`.
///
/// Entries only change through [`add`](Self::add) and
/// [`remove`](Self::remove), and each returns a new list with the entries
/// the API reports afterwards.
pub struct PlayerList<T = ReqwestTransport> {
    session: Arc<Session<T>>,
    server_id: String,
    name: String,
    entries: Option<Vec<String>>,
}

impl<T> Clone for PlayerList<T> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            server_id: self.server_id.clone(),
            name: self.name.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<T> fmt::Debug for PlayerList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerList")
            .field("server_id", &self.server_id)
            .field("name", &self.name)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl<T> PlayerList<T> {
    pub(crate) fn new(
        session: Arc<Session<T>>,
        server_id: String,
        name: String,
        entries: Option<Vec<String>>,
    ) -> Self {
        Self {
            session,
            server_id,
            name,
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Player names in API order. `None` if no entries were received.
    pub fn entries(&self) -> Option<&[String]> {
        self.entries.as_deref()
    }

    fn path(&self) -> ResourcePath {
        ResourcePath::player_list(&self.server_id, &self.name)
    }

    fn with_entries(&self, entries: Vec<String>) -> Self {
        Self::new(
            Arc::clone(&self.session),
            self.server_id.clone(),
            self.name.clone(),
            Some(entries),
        )
    }
}

impl<T: HttpTransport> PlayerList<T> {
    /// Fetches the current entries.
    pub async fn refresh(&self) -> Result<PlayerList<T>, ExarotonError> {
        let entries: Vec<String> = self
            .session
            .enveloped(Endpoint::get(
                self.path(),
                "getting player list entries",
            ))
            .await?;
        Ok(self.with_entries(entries))
    }

    /// Adds players to the list.
    pub async fn add<I, S>(&self, entries: I) -> Result<PlayerList<T>, ExarotonError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let body = PlayerListData {
            entries: Some(entries.into_iter().map(Into::into).collect()),
        };
        let endpoint = Endpoint::put(self.path(), "adding player list entries").json(&body)?;
        let entries: Vec<String> = self.session.enveloped(endpoint).await?;
        Ok(self.with_entries(entries))
    }

    /// Removes players from the list.
    pub async fn remove<I, S>(&self, entries: I) -> Result<PlayerList<T>, ExarotonError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let body = PlayerListData {
            entries: Some(entries.into_iter().map(Into::into).collect()),
        };
        let endpoint =
            Endpoint::delete(self.path(), "removing player list entries").json(&body)?;
        let entries: Vec<String> = self.session.enveloped(endpoint).await?;
        Ok(self.with_entries(entries))
    }
}
