use exaroton_protocol::{LogsData, ShareLogsData};

/// The server's current log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logs {
    content: Option<String>,
}

impl Logs {
    pub(crate) fn from_data(data: LogsData) -> Self {
        Self {
            content: data.content,
        }
    }

    /// The log text, or `None` if the server hasn't written one yet.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

/// A log uploaded to the external paste service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLogs {
    id: String,
    url: String,
    raw: String,
}

impl ShareLogs {
    pub(crate) fn from_data(data: ShareLogsData) -> Self {
        Self {
            id: data.id,
            url: data.url,
            raw: data.raw,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Link to the shared log page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Link to the plain-text log.
    pub fn raw_url(&self) -> &str {
        &self.raw
    }
}
