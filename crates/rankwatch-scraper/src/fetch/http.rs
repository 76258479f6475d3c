//! Direct HTTP GET with browser-like headers.

use std::time::Duration;

use rankwatch_core::AppConfig;
use reqwest::Client;

use super::PageFetcher;
use crate::delay::{DelayPolicy, PolitenessGate};
use crate::error::{FetchError, ScraperError};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-GB,en;q=0.5";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept_invalid_certs: bool,
}

impl HttpOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            accept_invalid_certs: config.accept_invalid_certs,
        }
    }
}

/// Fetches pages with a single GET each. No retries.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
    gate: PolitenessGate,
}

impl HttpFetcher {
    /// Builds the client with the configured timeout, `User-Agent` and TLS policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ClientBuild`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(options: &HttpOptions, delay: DelayPolicy) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(options.user_agent.as_str())
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(ScraperError::ClientBuild)?;
        Ok(Self {
            client,
            timeout_secs: options.timeout_secs,
            gate: PolitenessGate::new(delay),
        })
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, self.timeout_secs, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::NonSuccessStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, self.timeout_secs, &e))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.gate.wait_turn().await;
        tracing::debug!(url, "http fetch");
        let body = self.get(url).await?;
        tracing::debug!(url, bytes = body.len(), "http fetch complete");
        Ok(body)
    }
}
