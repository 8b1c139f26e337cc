use async_trait::async_trait;
use tracing::instrument;

use crate::config::Config;
use crate::crawler::PageFetcher;
use crate::error::{KboError, Result};
use crate::kbo_scraper::{self, BASE_URL};
use crate::model::{DateToken, ScheduleEntry, Team};

/// The main entry point for talking to Naver Sports.
///
/// `KboClient` wraps a [`reqwest::Client`] and serves schedule pages to the
/// crawler through [`PageFetcher`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> kbo_standings::Result<()> {
/// use kbo_standings::{DateToken, KboClient, PageFetcher, Team};
///
/// let client = KboClient::new();
/// let entries = client
///     .fetch_schedule(Team::Lg, &DateToken::Year(2024))
///     .await?;
/// println!("Found {} games", entries.len());
/// # Ok(())
/// # }
/// ```
pub struct KboClient {
    http: reqwest::Client,
    base_url: String,
}

impl KboClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Build a client with the user agent, timeout and base URL from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| KboError::Http {
                url: config.base_url.clone(),
                source,
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Default for KboClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for KboClient {
    #[instrument(skip(self))]
    async fn fetch_schedule(&self, team: Team, token: &DateToken) -> Result<Vec<ScheduleEntry>> {
        kbo_scraper::schedule::get_schedule(&self.http, &self.base_url, team, token).await
    }
}
