//! Fetch Capability
//!
//! Everything that talks to the outside world goes through `Fetcher`, which
//! turns a URL into decoded JSON or a `FetchError`. The HTTP implementation
//! bounds every request with a timeout and retries transient failures with
//! exponential backoff; tests swap in an in-memory implementation.

use crate::error::FetchError;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, FetchError>;
}

/// Fetches `url` and decodes the body into `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    fetcher: &dyn Fetcher,
    url: &str,
) -> Result<T, FetchError> {
    let value = fetcher.fetch(url).await?;
    serde_json::from_value(value).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

pub struct HttpFetcher {
    http_client: reqwest::Client,
    timeout: Duration,
    attempts: usize,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, attempts: usize) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("concert-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            http_client,
            timeout,
            attempts: attempts.max(1),
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    FetchError::Decode {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                }
            })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let mut delay_ms = 150u64;

        for attempt in 0..self.attempts {
            match self.fetch_once(url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt + 1 < self.attempts => {
                    tracing::debug!("Retrying {} after attempt {} failed: {}", url, attempt + 1, e);
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
                Err(e) => return Err(e),
            }
        }

        Err(FetchError::Network {
            url: url.to_string(),
            message: "retry attempts exhausted".to_string(),
        })
    }
}

fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
