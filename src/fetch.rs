//! HTTP fetch primitive shared by the crawl and download stages.
//!
//! A thin wrapper over [`reqwest::Client`] that turns every non-2xx status
//! into a structured [`FetchError`]. The pipeline treats any fetch failure
//! as fatal for the run; there is no retry layer here.
//!
//! # Example
//!
//! ```no_run
//! use lectern_core::fetch::HttpClient;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let page = Url::parse("https://example.edu/course/index.html")?;
//! let html = client.fetch_text(&page).await?;
//! println!("{} bytes of markup", html.len());
//! # Ok(())
//! # }
//! ```

use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default connection timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default whole-request timeout in seconds. Lecture scans and scanned
/// PDFs can be tens of megabytes on slow campus mirrors.
const DEFAULT_READ_TIMEOUT_SECS: u64 = 300;

/// User-Agent header sent with every request.
const USER_AGENT: &str = concat!("lectern/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur fetching a page or a file body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS
    /// errors, timeouts, body read failures).
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// HTTP error response (anything outside 2xx).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }
}

/// HTTP client for page and file fetches.
///
/// Cheap to clone; one instance is shared across the whole run so that
/// connection pooling applies to every fetch.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with default timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_timeouts(DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit connect/read timeouts in seconds.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(connect_timeout_secs))
            .timeout(std::time::Duration::from_secs(read_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            // The builder only fails when the TLS backend cannot be
            // initialized; static configuration, safe to panic.
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches a URL and returns the response body as text.
    ///
    /// # Errors
    ///
    /// [`FetchError::Network`] on transport failure, [`FetchError::HttpStatus`]
    /// on any non-2xx response.
    pub async fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.get_checked(url).await?;
        response
            .text()
            .await
            .map_err(|e| FetchError::network(url.as_str(), e))
    }

    /// Fetches a URL and returns the response body as raw bytes.
    ///
    /// # Errors
    ///
    /// [`FetchError::Network`] on transport failure, [`FetchError::HttpStatus`]
    /// on any non-2xx response.
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.get_checked(url).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(url.as_str(), e))?;
        Ok(body.to_vec())
    }

    async fn get_checked(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::network(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url.as_str(), status.as_u16()));
        }
        Ok(response)
    }
}
