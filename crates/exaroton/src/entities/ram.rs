use exaroton_protocol::RamData;

use crate::ExarotonError;

/// Smallest RAM size, in GB, a server can be given.
pub const MIN_RAM: u32 = 2;

/// Largest RAM size, in GB, a server can be given.
pub const MAX_RAM: u32 = 16;

/// A server's RAM allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ram {
    gb: u32,
}

impl Ram {
    pub(crate) fn from_data(data: RamData) -> Self {
        Self { gb: data.ram }
    }

    /// Rejects sizes outside `MIN_RAM..=MAX_RAM`.
    pub(crate) fn validate(gb: u32) -> Result<RamData, ExarotonError> {
        if !(MIN_RAM..=MAX_RAM).contains(&gb) {
            return Err(ExarotonError::Validation(format!(
                "ram must be between {MIN_RAM} and {MAX_RAM} GB, got {gb}"
            )));
        }
        Ok(RamData { ram: gb })
    }

    /// RAM in GB.
    pub fn gb(&self) -> u32 {
        self.gb
    }
}
