//! # exaroton
//!
//! Typed async client for the [exaroton](https://exaroton.com) server
//! hosting API.
//!
//! The client turns each API action into one `async fn`: it builds the
//! resource path, sends the request through an [`HttpTransport`], and
//! unwraps the `{success, error, data}` envelope into an entity or an
//! [`ExarotonError`].
//!
//! ```text
//! ExarotonClient ──► Session (token, config, transport)
//!       │                 ▲
//!       ▼                 │ shared via Arc
//!   Server ── File, PlayerList, Logs, Ram, Subscription
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exaroton::prelude::*;
//!
//! # async fn demo() -> Result<(), ExarotonError> {
//! let client = ExarotonClient::new("my-api-token")?;
//! let server = client.get_server("tgkm731xO7GiHt76").await?;
//!
//! if server.has_status(&[ServerStatus::Offline]) {
//!     server.start().await?;
//! }
//!
//! let whitelist = server.get_player_list("whitelist").await?;
//! let whitelist = whitelist.add(["Steve"]).await?;
//! println!("{:?}", whitelist.entries());
//! # Ok(())
//! # }
//! ```
//!
//! Tests and callers with their own HTTP stack can plug in any
//! [`HttpTransport`] through [`ExarotonClient::with_transport`].

mod client;
mod config;
mod endpoint;
mod entities;
mod error;
mod session;
mod subscription;

pub use client::{ExarotonClient, ExarotonClientBuilder};
pub use config::{
    ClientConfig, DEFAULT_HOST, DEFAULT_PING_INTERVAL, DEFAULT_PREFIX, Protocol, SERVER_ID_ENV,
};
pub use endpoint::{CONTENT_TYPE_DIRECTORY, CONTENT_TYPE_JSON};
pub use entities::{
    Account, File, Logs, MAX_RAM, MIN_RAM, PlayerInfo, PlayerList, Ram, Server, ShareLogs,
    Software,
};
pub use error::ExarotonError;
pub use subscription::{ServerEvent, Subscription};

pub use exaroton_protocol::{ApiError, ServerStatus, StreamMessage};
pub use exaroton_transport::{
    ByteStream, HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, RequestBody,
    TransportError,
};

/// Convenience re-exports for common usage.
///
/// ```rust
/// use exaroton::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ExarotonClient, ExarotonError, File, PlayerList, Server, ServerEvent, ServerStatus,
        Subscription,
    };
}
