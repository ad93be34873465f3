pub mod types;

pub use types::{RawStats, UsageRecord};

use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;

/// Client for the model-usage statistics endpoint.
pub struct StatsClient {
    url: String,
    client: Client,
}

impl StatsClient {
    #[must_use]
    pub fn new(url: &str, timeout_secs: u64) -> Self {
        Self {
            url: url.to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Fetch and decode the per-period usage counts.
    ///
    /// Any failure here aborts the run before anything is written.
    pub async fn fetch(&self) -> Result<RawStats, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        response.json().await.map_err(FetchError::Decode)
    }
}
