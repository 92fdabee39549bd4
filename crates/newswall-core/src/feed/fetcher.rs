use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::models::{ArticleSummary, HeadlineResponse};
use crate::config::AppConfig;
use crate::{Error, Result};

const USER_AGENT: &str = concat!("newswall/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the headline endpoints.
///
/// One instance is shared by every panel; reqwest pools connections per
/// host underneath.
pub struct HeadlineFetcher {
    client: Client,
}

impl HeadlineFetcher {
    /// Create a new fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(config.sync.request_timeout_secs)?;
        Ok(Self { client })
    }

    fn build_client(timeout_secs: u64) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10));

        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        builder.build().map_err(Error::Http)
    }

    /// Run one fetch cycle against `endpoint`: GET, status check, parse the
    /// `news` array. An empty array is a valid "no articles" outcome, not an
    /// error.
    pub async fn fetch(&self, endpoint: &Url) -> Result<Vec<ArticleSummary>> {
        tracing::debug!("Fetching headlines from {}", endpoint);

        let response = self.client.get(endpoint.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Status {
                status,
                url: endpoint.to_string(),
            });
        }

        let body = response.bytes().await?;
        let parsed: HeadlineResponse = serde_json::from_slice(&body).map_err(|e| {
            Error::Parse(format!(
                "expected a JSON object with a `news` array: {}",
                e
            ))
        })?;

        Ok(parsed.news)
    }
}
