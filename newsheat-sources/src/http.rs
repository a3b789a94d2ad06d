//! HTTP fetching with retry and exponential backoff

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::SourceError;

/// Desktop browser user agent; several feeds refuse obvious bots
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Fetch policy
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure
    pub backoff_base: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// Shared HTTP fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.9,zh-CN;q=0.8,zh;q=0.7"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Fetch a URL as text, retrying transient failures.
    ///
    /// 401/403/404 are returned immediately. Other failures are retried up
    /// to `max_attempts` with exponential backoff.
    pub async fn fetch_text(&self, url: &str) -> Result<String, SourceError> {
        let mut last_error = SourceError::RequestFailed(format!("no attempt made for {}", url));

        for attempt in 0..self.config.max_attempts {
            match self.fetch_once(url, self.config.timeout).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_permanent() => {
                    warn!("{} (not retrying)", e);
                    return Err(e);
                }
                Err(e) => {
                    warn!("Fetch attempt {} for {} failed: {}", attempt + 1, url, e);
                    last_error = e;
                }
            }

            if attempt + 1 < self.config.max_attempts {
                let delay = self.config.backoff_base * 2u32.pow(attempt);
                debug!("Retrying {} in {:?}", url, delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error)
    }

    /// Fetch and decode a JSON document
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let body = self.fetch_text(url).await?;
        serde_json::from_str(&body)
            .map_err(|e| SourceError::ParseError(format!("JSON decode failed for {}: {}", url, e)))
    }

    /// Single attempt with its own timeout, no retry
    pub async fn fetch_once(&self, url: &str, timeout: Duration) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout(url.to_string())
                } else {
                    SourceError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::RequestFailed(e.to_string()))?;

        Ok(decode_body(&bytes))
    }

    /// Status code of a GET, or `None` when the request itself failed
    pub async fn probe(&self, url: &str, timeout: Duration) -> Option<StatusCode> {
        match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => Some(response.status()),
            Err(e) => {
                debug!("Probe {} failed: {}", url, e);
                None
            }
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}

/// Decode a body as UTF-8, then GBK, then Windows-1252 (which cannot fail)
pub fn decode_body(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let (text, had_errors) = encoding_rs::GBK.decode_without_bom_handling(bytes);
    if !had_errors {
        return text.into_owned();
    }

    let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}
