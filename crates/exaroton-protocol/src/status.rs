//! Server status codes.

use std::fmt;

use crate::ProtocolError;

/// The lifecycle state of a server, as reported by the API.
///
/// The numbering comes from the API and skips 9: `Preparing` is 10.
/// There are no client-side transitions; a new state is only observed by
/// fetching the server again or through a websocket `status` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerStatus {
    Offline,
    Online,
    Starting,
    Stopping,
    Restarting,
    Saving,
    Loading,
    Crashed,
    Pending,
    Preparing,
}

impl ServerStatus {
    /// Every status, in code order.
    pub const ALL: [ServerStatus; 10] = [
        Self::Offline,
        Self::Online,
        Self::Starting,
        Self::Stopping,
        Self::Restarting,
        Self::Saving,
        Self::Loading,
        Self::Crashed,
        Self::Pending,
        Self::Preparing,
    ];

    /// Maps a wire code to a status.
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnknownStatus`] for 9 and for anything
    /// outside `0..=10`.
    pub fn from_code(code: i64) -> Result<Self, ProtocolError> {
        match code {
            0 => Ok(Self::Offline),
            1 => Ok(Self::Online),
            2 => Ok(Self::Starting),
            3 => Ok(Self::Stopping),
            4 => Ok(Self::Restarting),
            5 => Ok(Self::Saving),
            6 => Ok(Self::Loading),
            7 => Ok(Self::Crashed),
            8 => Ok(Self::Pending),
            10 => Ok(Self::Preparing),
            other => Err(ProtocolError::UnknownStatus(other)),
        }
    }

    /// The wire code for this status.
    pub fn code(self) -> i64 {
        match self {
            Self::Offline => 0,
            Self::Online => 1,
            Self::Starting => 2,
            Self::Stopping => 3,
            Self::Restarting => 4,
            Self::Saving => 5,
            Self::Loading => 6,
            Self::Crashed => 7,
            Self::Pending => 8,
            Self::Preparing => 10,
        }
    }
}

impl TryFrom<i64> for ServerStatus {
    type Error = ProtocolError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Offline => "Offline",
            Self::Online => "Online",
            Self::Starting => "Starting",
            Self::Stopping => "Stopping",
            Self::Restarting => "Restarting",
            Self::Saving => "Saving",
            Self::Loading => "Loading",
            Self::Crashed => "Crashed",
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
        };
        f.pad(name)
    }
}
