//! Wire protocol for the exaroton API client.
//!
//! This crate defines what travels between the client and
//! `api.exaroton.com`, without doing any I/O:
//!
//! - **Envelope** ([`Envelope`]): the `{success, error, data}` wrapper
//!   every enveloped response uses, and the rule that `data` alone
//!   decides success.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how bodies become bytes
//!   and back.
//! - **Payloads** ([`ServerData`], [`FileInfoData`], ...) and
//!   [`ServerStatus`].
//! - **Resource paths** ([`ResourcePath`]): endpoint paths built from
//!   literal and parameter segments.
//! - **Errors** ([`ProtocolError`], [`ApiError`]).
//!
//! ```text
//! Transport (bytes) → Protocol (Envelope<T>) → Client (entities)
//! ```

mod codec;
mod envelope;
mod error;
pub mod resource;
mod status;
#[cfg(feature = "json")]
pub mod stream;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use envelope::Envelope;
pub use error::{ApiError, ProtocolError};
pub use resource::{ResourcePath, Segment, clean_server_id, normalize_file_path};
pub use status::ServerStatus;
#[cfg(feature = "json")]
pub use stream::StreamMessage;
pub use types::{
    AccountData, CommandData, FileInfoData, LogsData, MotdData, PlayerInfoData,
    PlayerListData, RamData, ServerData, ShareLogsData, SoftwareData, StartData,
};
