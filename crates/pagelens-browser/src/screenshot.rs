use async_trait::async_trait;
use chrono::Utc;
use pagelens_core::screenshot::{ScreenshotRecord, ScreenshotStore};
use pagelens_core::{Error, Result};
use std::path::PathBuf;
use url::Url;

/// Writes captures to a directory as `<host>-<timestamp>.png`
pub struct LocalScreenshotStore {
    dir: PathBuf,
}

impl LocalScreenshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_name(url: &str) -> String {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "page".to_string());
        let host: String = host
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        format!("{}-{}.png", host, Utc::now().format("%Y%m%dT%H%M%S%3f"))
    }
}

#[async_trait]
impl ScreenshotStore for LocalScreenshotStore {
    async fn store(&self, url: &str, png: Vec<u8>) -> Result<ScreenshotRecord> {
        let io = |e: std::io::Error| Error::Collection(format!("screenshot write failed: {}", e));

        tokio::fs::create_dir_all(&self.dir).await.map_err(io)?;
        let dir = tokio::fs::canonicalize(&self.dir).await.map_err(io)?;
        let path = dir.join(Self::file_name(url));
        let size = png.len() as u64;
        tokio::fs::write(&path, png).await.map_err(io)?;

        let blob_url = Url::from_file_path(&path)
            .map_err(|_| Error::Collection(format!("not an absolute path: {}", path.display())))?;
        let mut download_url = blob_url.clone();
        download_url.set_query(Some("download=1"));

        tracing::info!("Saved screenshot to {}", path.display());
        Ok(ScreenshotRecord {
            url: url.to_string(),
            blob_url: blob_url.to_string(),
            pathname: path.display().to_string(),
            download_url: download_url.to_string(),
            size,
            uploaded_at: Utc::now(),
        })
    }
}
