//! Client configuration.

use std::fmt;
use std::time::Duration;

/// Default API host.
pub const DEFAULT_HOST: &str = "api.exaroton.com";

/// Default path prefix, including the API version.
pub const DEFAULT_PREFIX: &str = "v1/";

/// Environment variable holding the id of the "current" server.
pub const SERVER_ID_ENV: &str = "EXAROTON_SERVER_ID";

/// How often the websocket sends a keep-alive ping.
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_millis(3000);

// ---------------------------------------------------------------------------
// Protocol
// ---------------------------------------------------------------------------

/// URL scheme for API requests. The websocket scheme follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Https,
    /// Plain HTTP, for local mock servers.
    Http,
}

impl Protocol {
    /// The HTTP scheme, `https` or `http`.
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }

    /// The matching websocket scheme, `wss` or `ws`.
    pub fn websocket_scheme(self) -> &'static str {
        match self {
            Self::Https => "wss",
            Self::Http => "ws",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Request defaults shared by every operation of one client.
///
/// The defaults talk to the public API; override `protocol` and `host`
/// to point the client at a local mock.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `https` (default) or `http`.
    pub protocol: Protocol,

    /// Host name, optionally with a port (`127.0.0.1:8080`).
    pub host: String,

    /// Path prefix prepended to every resource path. Ends with `/`.
    pub prefix: String,

    /// Value of the `User-Agent` header.
    pub user_agent: String,

    /// Interval between websocket keep-alive pings.
    pub ping_interval: Duration,

    /// Name of the environment variable
    /// [`get_current_server`](crate::ExarotonClient::get_current_server) reads.
    pub server_id_env: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::Https,
            host: DEFAULT_HOST.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            user_agent: concat!("exaroton@", env!("CARGO_PKG_VERSION")).to_string(),
            ping_interval: DEFAULT_PING_INTERVAL,
            server_id_env: SERVER_ID_ENV.to_string(),
        }
    }
}

impl ClientConfig {
    /// Base URL for HTTP requests, e.g. `https://api.exaroton.com/v1/`.
    pub fn base_url(&self) -> String {
        format!("{}://{}/{}", self.protocol.scheme(), self.host, self.prefix)
    }

    /// Base URL for websocket connections, e.g. `wss://api.exaroton.com/v1/`.
    pub fn websocket_base_url(&self) -> String {
        format!(
            "{}://{}/{}",
            self.protocol.websocket_scheme(),
            self.host,
            self.prefix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "https://api.exaroton.com/v1/");
        assert_eq!(config.websocket_base_url(), "wss://api.exaroton.com/v1/");
        assert_eq!(config.ping_interval, Duration::from_millis(3000));
        assert_eq!(config.server_id_env, "EXAROTON_SERVER_ID");
        assert!(config.user_agent.starts_with("exaroton@"));
    }

    #[test]
    fn test_http_protocol_uses_plain_websocket() {
        let config = ClientConfig {
            protocol: Protocol::Http,
            host: "127.0.0.1:9000".into(),
            ..ClientConfig::default()
        };
        assert_eq!(config.base_url(), "http://127.0.0.1:9000/v1/");
        assert_eq!(config.websocket_base_url(), "ws://127.0.0.1:9000/v1/");
    }
}
