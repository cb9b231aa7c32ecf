//! Upstream snapshot retrieval.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, instrument};

/// Trait for sources that can fetch one numbered snapshot file.
///
/// The production implementation talks HTTP; tests inject in-memory sources.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the raw body of the snapshot file with the given name.
    async fn fetch_snapshot(&self, file_name: &str) -> Result<Bytes>;
}

/// HTTP snapshot source backed by the constellation provider.
pub struct HttpSnapshotSource {
    client: Client,
    base_url: String,
}

impl HttpSnapshotSource {
    /// Create a source for the given provider base URL. Every request
    /// carries a timeout so one slow file cannot stall a consolidation pass
    /// indefinitely.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    #[instrument(skip(self))]
    async fn fetch_snapshot(&self, file_name: &str) -> Result<Bytes> {
        let url = format!("{}/{}", self.base_url, file_name);

        debug!(url = %url, "Fetching snapshot file");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("Snapshot fetch failed: HTTP {}", response.status()));
        }

        Ok(response.bytes().await?)
    }
}
