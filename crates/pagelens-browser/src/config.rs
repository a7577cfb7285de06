use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REMOTE_ENDPOINT: &str = "https://production-sfo.browserless.io";

pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(45);
pub const MIN_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_AUDIT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl std::str::FromStr for Viewport {
    type Err = String;

    /// Parse `WIDTHxHEIGHT`, e.g. `1366x768`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("invalid viewport '{}', expected WIDTHxHEIGHT", s))?;

        let width: u32 = width
            .trim()
            .parse()
            .map_err(|_| format!("invalid viewport width '{}'", width))?;
        let height: u32 = height
            .trim()
            .parse()
            .map_err(|_| format!("invalid viewport height '{}'", height))?;

        if width == 0 || height == 0 {
            return Err("viewport dimensions must be positive".to_string());
        }

        Ok(Self { width, height })
    }
}

/// Where pages are rendered
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Backend {
    /// A locally launched Chrome or Chromium
    #[default]
    Local,
    /// A hosted rendering service reached over the DevTools WebSocket
    Remote { endpoint: String, token: String },
}

impl Backend {
    /// Remote only for a production deployment with a non-empty token
    pub fn select(environment: Option<&str>, token: Option<&str>, endpoint: Option<&str>) -> Self {
        let production = environment.is_some_and(|e| e.trim().eq_ignore_ascii_case("production"));
        let token = token.map(str::trim).filter(|t| !t.is_empty());

        match (production, token) {
            (true, Some(token)) => Backend::Remote {
                endpoint: endpoint
                    .map(|e| e.trim().trim_end_matches('/'))
                    .filter(|e| !e.is_empty())
                    .unwrap_or(DEFAULT_REMOTE_ENDPOINT)
                    .to_string(),
                token: token.to_string(),
            },
            _ => Backend::Local,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Backend::Remote { .. })
    }

    /// DevTools WebSocket URL for the remote service
    pub fn websocket_url(&self) -> Option<String> {
        match self {
            Backend::Local => None,
            Backend::Remote { endpoint, token } => {
                let base = if let Some(rest) = endpoint.strip_prefix("https://") {
                    format!("wss://{}", rest)
                } else if let Some(rest) = endpoint.strip_prefix("http://") {
                    format!("ws://{}", rest)
                } else {
                    endpoint.clone()
                };
                Some(format!("{}?token={}", base, token))
            }
        }
    }
}

/// Settings for one browser session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub viewport: Viewport,
    pub navigation_timeout: Duration,
    pub backend: Backend,
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            backend: Backend::Local,
            chrome_path: None,
            headless: true,
        }
    }
}

impl SessionConfig {
    /// Set the navigation timeout, clamped to the 30-60s range
    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout.clamp(MIN_NAVIGATION_TIMEOUT, MAX_NAVIGATION_TIMEOUT);
        self
    }
}

/// Settings for the performance audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub timeout: Duration,
    pub backend: Backend,
    pub viewport: Viewport,
    pub lighthouse_path: Option<PathBuf>,
    pub chrome_path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_AUDIT_TIMEOUT,
            backend: Backend::Local,
            viewport: Viewport::default(),
            lighthouse_path: None,
            chrome_path: None,
        }
    }
}
