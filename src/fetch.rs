//! Page fetching over HTTP.
//!
//! The pipeline only needs "give me the HTML behind this url", so that is the
//! whole of the [`FetchPage`] interface. [`HttpFetcher`] is the production
//! implementation; tests plug in canned pages instead.
//!
//! Each request is a single attempt bounded by the configured timeout.
//! Retrying is left to the next run.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use tracing::{debug, instrument};

/// Trait for retrieving the raw HTML of a page.
pub trait FetchPage {
    /// Fetch `url` and return its body as text.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Http`] for transport failures and timeouts,
    /// [`ScrapeError::Status`] for non-2xx responses.
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// [`FetchPage`] backed by a shared `reqwest` client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ScrapeError::Http {
                url: config.site_url.to_string(),
                source,
            })?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let http_err = |source: reqwest::Error| ScrapeError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(http_err)?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
