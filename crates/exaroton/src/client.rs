//! `ExarotonClient` and its builder.

use std::env::VarError;
use std::sync::Arc;
use std::time::Duration;

use exaroton_protocol::{AccountData, ResourcePath, ServerData, clean_server_id};
use exaroton_transport::{HttpTransport, ReqwestTransport};

use crate::config::{ClientConfig, Protocol};
use crate::endpoint::Endpoint;
use crate::entities::{Account, Server};
use crate::session::Session;
use crate::ExarotonError;

/// Entry point to the API.
///
/// Owns the session (transport, config, token) that every entity it
/// returns shares. Cloning is cheap and clones share the token.
///
/// # Example
///
/// ```rust,no_run
/// use exaroton::ExarotonClient;
///
/// # async fn demo() -> Result<(), exaroton::ExarotonError> {
/// let client = ExarotonClient::new("my-api-token")?;
/// for server in client.get_servers().await? {
///     println!("{server}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct ExarotonClient<T = ReqwestTransport> {
    session: Arc<Session<T>>,
}

impl<T> Clone for ExarotonClient<T> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

impl ExarotonClient<ReqwestTransport> {
    /// Creates a client with the default configuration and transport.
    pub fn new(token: impl Into<String>) -> Result<Self, ExarotonError> {
        Self::builder().token(token).build()
    }

    /// Creates a builder with default settings.
    pub fn builder() -> ExarotonClientBuilder {
        ExarotonClientBuilder::new()
    }
}

impl<T: HttpTransport> ExarotonClient<T> {
    /// Creates a client with the default configuration on top of
    /// `transport`.
    pub fn with_transport(transport: T, token: impl Into<String>) -> Self {
        ExarotonClientBuilder::new()
            .token(token)
            .build_with_transport(transport)
    }

    /// The configuration requests are built with.
    pub fn config(&self) -> &ClientConfig {
        self.session.config()
    }

    /// The current API token.
    pub fn token(&self) -> String {
        self.session.token()
    }

    /// Replaces the API token for every request built from now on,
    /// including those issued through entities this client returned
    /// earlier.
    pub fn set_token(&self, token: impl Into<String>) {
        self.session.set_token(token.into());
    }

    /// Fetches the account the token belongs to.
    pub async fn get_account(&self) -> Result<Account, ExarotonError> {
        let data: AccountData = self
            .session
            .enveloped(Endpoint::get(
                ResourcePath::account(),
                "getting account info",
            ))
            .await?;
        Ok(Account::from_data(data))
    }

    /// Lists every server the account owns or has been shared.
    ///
    /// The entries are list snapshots: [`Server::is_fetched`] is `false`.
    pub async fn get_servers(&self) -> Result<Vec<Server<T>>, ExarotonError> {
        let data: Vec<ServerData> = self
            .session
            .enveloped(Endpoint::get(
                ResourcePath::servers(),
                "requesting all servers",
            ))
            .await?;
        data.into_iter()
            .map(|server| Server::from_data(Arc::clone(&self.session), server, false))
            .collect()
    }

    /// Fetches one server. `id` is cleaned first, so pasted ids with
    /// stray whitespace or a leading `#` still resolve.
    ///
    /// # Errors
    /// `Validation`, without any request, if nothing is left of `id` after
    /// cleaning.
    pub async fn get_server(&self, id: &str) -> Result<Server<T>, ExarotonError> {
        let id = clean_server_id(id);
        if id.is_empty() {
            return Err(ExarotonError::Validation("server id must not be empty".into()));
        }
        let data: ServerData = self
            .session
            .enveloped(Endpoint::get(
                ResourcePath::server(&id),
                format!("requesting your server with id {id}"),
            ))
            .await?;
        Server::from_data(Arc::clone(&self.session), data, true)
    }

    /// Fetches the server named by the configured environment variable
    /// (`EXAROTON_SERVER_ID` by default).
    ///
    /// Returns `Ok(None)`, without any request, when the variable is
    /// unset or empty. A value that isn't valid unicode is a
    /// `Validation` error.
    pub async fn get_current_server(&self) -> Result<Option<Server<T>>, ExarotonError> {
        let var = &self.session.config().server_id_env;
        match current_server_id(var, std::env::var(var))? {
            Some(id) => self.get_server(&id).await.map(Some),
            None => Ok(None),
        }
    }
}

fn current_server_id(
    var: &str,
    value: Result<String, VarError>,
) -> Result<Option<String>, ExarotonError> {
    match value {
        Ok(id) if id.trim().is_empty() => Ok(None),
        Ok(id) => Ok(Some(id)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ExarotonError::Validation(format!(
            "{var} is not valid unicode"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for an [`ExarotonClient`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use exaroton::ExarotonClient;
///
/// # fn demo() -> Result<(), exaroton::ExarotonError> {
/// let client = ExarotonClient::builder()
///     .token("my-api-token")
///     .ping_interval(Duration::from_secs(5))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct ExarotonClientBuilder {
    token: String,
    config: ClientConfig,
}

impl std::fmt::Debug for ExarotonClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExarotonClientBuilder")
            .field("token", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl ExarotonClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.config.protocol = protocol;
        self
    }

    /// Sets the host, optionally with a port.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Sets the path prefix. A trailing `/` is added if missing.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }
        self.config.prefix = prefix;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Sets how often subscriptions ping the API.
    pub fn ping_interval(mut self, interval: Duration) -> Self {
        self.config.ping_interval = interval;
        self
    }

    /// Sets the environment variable `get_current_server` reads.
    pub fn server_id_env(mut self, name: impl Into<String>) -> Self {
        self.config.server_id_env = name.into();
        self
    }

    /// Builds a client on the default reqwest transport.
    ///
    /// # Errors
    /// `Transport` if the HTTP client can't be initialized.
    pub fn build(self) -> Result<ExarotonClient<ReqwestTransport>, ExarotonError> {
        let transport = ReqwestTransport::new()?;
        Ok(self.build_with_transport(transport))
    }

    /// Builds a client on a caller-supplied transport.
    pub fn build_with_transport<T: HttpTransport>(self, transport: T) -> ExarotonClient<T> {
        tracing::debug!(base_url = %self.config.base_url(), "client created");
        ExarotonClient {
            session: Arc::new(Session::new(transport, self.config, self.token)),
        }
    }
}
