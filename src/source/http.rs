//! HTTP fetcher for the Snapshot API.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{FetchError, Snapshot, SnapshotFetcher, WindowHours};

/// Fetches snapshots from `GET {base}/api/status?hours=N`.
///
/// Any non-2xx status and any body that does not decode as a [`Snapshot`]
/// count as failures.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
    description: String,
}

impl HttpFetcher {
    /// Create a fetcher for the given API base url.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let description = format!("api: {}", base_url);
        Ok(Self {
            client,
            base_url,
            description,
        })
    }

    /// The status endpoint without query parameters.
    pub fn endpoint(&self) -> String {
        format!("{}/api/status", self.base_url)
    }
}

#[async_trait]
impl SnapshotFetcher for HttpFetcher {
    async fn fetch(&self, window: WindowHours) -> Result<Snapshot, FetchError> {
        let url = self.endpoint();
        debug!(%url, hours = window.get(), "requesting snapshot");

        let response = self
            .client
            .get(&url)
            .query(&[("hours", window.get())])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
