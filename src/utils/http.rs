use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::ScraperConfig;
use crate::error::FetchError;

/// A fetched document and the URL it ended up at after redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub final_url: String,
    pub body: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

pub fn create_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
}

/// GET with exponential backoff between attempts. Redirects are followed.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    max_attempts: u32,
) -> Result<Response, FetchError> {
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        let error = match client.get(url).send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => {
                let status = response.status();
                warn!("HTTP error {}: {}", status, url);
                FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                }
            }
            Err(e) => {
                error!("Request failed for {}: {}", url, e);
                FetchError::Request {
                    url: url.to_string(),
                    source: e,
                }
            }
        };

        attempts += 1;
        if attempts >= max_attempts {
            return Err(error);
        }

        let delay = Duration::from_secs(2u64.pow(attempts));
        warn!("Retrying in {:?}... (attempt {}/{})", delay, attempts + 1, max_attempts);
        sleep(delay).await;
    }
}

/// [`PageFetcher`] over a shared reqwest client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    max_attempts: u32,
}

impl HttpFetcher {
    pub fn new(client: Client, max_attempts: u32) -> Self {
        Self {
            client,
            max_attempts,
        }
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(create_client(config)?, config.max_attempts))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = fetch_with_retry(&self.client, url, self.max_attempts).await?;
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            source: e,
        })?;

        Ok(FetchedPage { final_url, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_scraper_config() {
        let config = ScraperConfig {
            timeout_seconds: 3,
            ..ScraperConfig::default()
        };
        assert!(create_client(&config).is_ok());

        let fetcher = HttpFetcher::from_config(&config).unwrap();
        assert_eq!(fetcher.max_attempts, 1);
    }
}
