use reqwest::header::{self, HeaderMap, HeaderValue};
use std::fmt;
use std::time::Duration;

use crate::{DEFAULT_CHUNK_SIZE, DEFAULT_PROGRESS_WIDTH, DEFAULT_USER_AGENT};

/**
Holds the http configuration for a FileFetcher
 */
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /**
     * Request headers, User-Agent is always present
     */
    pub headers: HeaderMap,
    /**
     * Size of the slices the body is written and reported in
     */
    pub chunk_size: usize,
    /**
     * Glyph slots of the progress bar
     */
    pub progress_width: u64,
    /**
     * Optional request timeout, no timeout when None
     */
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    /**
    Creates a default set of settings:
    * headers: { user-agent: "upiot-fetch" }
    * chunk_size: 1024 bytes
    * progress_width: 5
    * timeout: none
     */
    fn default() -> Self {
        let mut config = FetchConfig {
            headers: HeaderMap::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_width: DEFAULT_PROGRESS_WIDTH,
            timeout: None,
        };
        config.headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_USER_AGENT),
        );
        config
    }
}

impl FetchConfig {
    /// Replaces the User-Agent header, fails if the value is not a valid header value.
    pub fn with_user_agent(mut self, user_agent: &UserAgent) -> crate::Result<Self> {
        let value = HeaderValue::from_str(&user_agent.to_string())?;
        self.headers.insert(header::USER_AGENT, value);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// `<product>/<version> (<host>/<host_version>)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent {
    pub product: String,
    pub version: String,
    pub host: String,
    pub host_version: String,
}

impl UserAgent {
    pub fn new(
        product: impl Into<String>,
        version: impl Into<String>,
        host: impl Into<String>,
        host_version: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            version: version.into(),
            host: host.into(),
            host_version: host_version.into(),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({}/{})",
            self.product, self.version, self.host, self.host_version
        )
    }
}
