use std::path::PathBuf;
use std::time::Duration;

/// Public translation API host.
pub const DEFAULT_API_BASE: &str = "https://api.wordpress.org";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!("wp-langs/", env!("CARGO_PKG_VERSION"));

/// Errors constructing the HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Settings shared by the catalog client and the downloader.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Overrides [`DEFAULT_API_BASE`]; used for mirrors and tests.
    pub api_base_url: Option<String>,
    /// Deadline for a whole request, including reading the body.
    pub timeout: Duration,
    /// Where downloaded archives are staged. Defaults to
    /// `$TMPDIR/wp-langs`.
    pub staging_dir: Option<PathBuf>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            timeout: DEFAULT_TIMEOUT,
            staging_dir: None,
        }
    }
}

impl HttpSettings {
    pub fn api_base(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("wp-langs"))
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::Client, ClientError> {
        Ok(reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?)
    }
}
