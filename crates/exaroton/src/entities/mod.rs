//! Read-only views over decoded payloads.
//!
//! Entities are only built from a successfully decoded response. They
//! never change after that: operations that re-fetch (`refresh`, player
//! list `add`/`remove`) return a new entity and leave the old one alone.

mod account;
mod file;
mod logs;
mod player_list;
mod ram;
mod server;

pub use account::Account;
pub use file::File;
pub use logs::{Logs, ShareLogs};
pub use player_list::PlayerList;
pub use ram::{MAX_RAM, MIN_RAM, Ram};
pub use server::{PlayerInfo, Server, Software};
