//! Rekor client for transparency log operations

use crate::error::{Error, Result};
use rekor_types::{single_entry, ConsistencyProof, LogEntry, LogEntryResponse, LogInfo, TreeId};
use serde::de::DeserializeOwned;

/// URL of the public Sigstore Rekor instance
pub const PUBLIC_REKOR_URL: &str = "https://rekor.sigstore.dev";

/// URL of the Sigstore staging Rekor instance
pub const STAGING_REKOR_URL: &str = "https://rekor.sigstage.dev";

/// A client for interacting with Rekor
pub struct RekorClient {
    /// Base URL of the Rekor instance
    url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl RekorClient {
    /// Create a new Rekor client
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client for the public Sigstore Rekor instance
    pub fn public() -> Self {
        Self::new(PUBLIC_REKOR_URL)
    }

    /// Create a client for the Sigstore staging Rekor instance
    pub fn staging() -> Self {
        Self::new(STAGING_REKOR_URL)
    }

    /// Base URL this client talks to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the latest stable tree head (tree size, root hash, signed checkpoint)
    pub async fn get_log_info(&self) -> Result<LogInfo> {
        let url = format!("{}/api/v1/log?stable=true", self.url);
        self.get_json(&url, "log info").await
    }

    /// Get a log entry by UUID
    pub async fn get_entry_by_uuid(&self, uuid: &str) -> Result<LogEntry> {
        let url = format!("{}/api/v1/log/entries/{}", self.url, uuid);
        let entries: LogEntryResponse = self.get_json(&url, &format!("entry {}", uuid)).await?;
        Ok(single_entry(entries)?)
    }

    /// Get a log entry by index
    pub async fn get_entry_by_index(&self, index: u64) -> Result<LogEntry> {
        let url = format!("{}/api/v1/log/entries?logIndex={}", self.url, index);
        let entries: LogEntryResponse = self
            .get_json(&url, &format!("entry at index {}", index))
            .await?;
        Ok(single_entry(entries)?)
    }

    /// Get a consistency proof between two tree sizes
    ///
    /// `last_size` defaults to the current tree size on the server, `tree_id`
    /// to the active shard.
    pub async fn get_consistency_proof(
        &self,
        first_size: u64,
        last_size: Option<u64>,
        tree_id: Option<&TreeId>,
    ) -> Result<ConsistencyProof> {
        let mut url = format!("{}/api/v1/log/proof?firstSize={}", self.url, first_size);
        if let Some(last_size) = last_size {
            url.push_str(&format!("&lastSize={}", last_size));
        }
        if let Some(tree_id) = tree_id {
            url.push_str(&format!("&treeID={}", tree_id));
        }
        self.get_json(&url, "consistency proof").await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        tracing::debug!(url, "fetching {}", what);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!(
                "failed to get {}: {} - {}",
                what, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Http(format!("failed to parse JSON: {}", e)))
    }
}

impl Default for RekorClient {
    fn default() -> Self {
        Self::public()
    }
}
