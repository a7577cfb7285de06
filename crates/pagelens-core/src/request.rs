use crate::{Error, Result};
use url::Url;

/// A validated absolute http(s) URL to analyze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    url: Url,
}

impl AnalysisRequest {
    /// Parse and validate a URL. Only absolute http/https URLs are accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let url = Url::parse(trimmed)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", trimmed, e)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::InvalidUrl(format!(
                    "unsupported scheme '{}' (only http and https are allowed)",
                    other
                )));
            }
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(Error::InvalidUrl(format!("{}: missing host", trimmed)));
        }

        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Host portion of the URL, used for naming artifacts
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("unknown")
    }
}

impl std::fmt::Display for AnalysisRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}
