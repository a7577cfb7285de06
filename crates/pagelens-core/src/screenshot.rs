use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the screenshot collaborator returns for a stored capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotRecord {
    pub url: String,
    pub blob_url: String,
    pub pathname: String,
    pub download_url: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Stores a captured PNG for a page URL
#[async_trait]
pub trait ScreenshotStore: Send + Sync {
    async fn store(&self, url: &str, png: Vec<u8>) -> Result<ScreenshotRecord>;
}
