use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_TABLE: &str = "Applications";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the remote record store.
///
/// Records live at `<api_url>/<base_id>/<table>`; every request carries
/// `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct RemoteConfig {
    pub api_url: String,
    pub base_id: String,
    pub table: String,
    pub token: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(base_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            base_id: base_id.into(),
            table: DEFAULT_TABLE.to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// The token stays out of logs.
impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("api_url", &self.api_url)
            .field("base_id", &self.base_id)
            .field("table", &self.table)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
