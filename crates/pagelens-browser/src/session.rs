use crate::config::{Backend, SessionConfig, Viewport};
use crate::probe::ChromePage;
use crate::{ChromeFinder, Error, Result, SessionProfile};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::handler::viewport::Viewport as CdpViewport;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::path::Path;
use tokio::task::JoinHandle;

/// One browser and page, owned by a single analysis request
///
/// `close()` shuts the browser down; dropping the session without closing
/// stops the protocol handler and removes the temporary profile.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    config: SessionConfig,
    closed: bool,
    // Dropped last so Chrome is gone before its profile is removed
    _profile: Option<SessionProfile>,
}

impl BrowserSession {
    pub async fn open(config: SessionConfig) -> Result<Self> {
        let (browser, mut handler, profile) = match &config.backend {
            Backend::Local => {
                let chrome = ChromeFinder::new(config.chrome_path.clone()).find()?;
                let profile = SessionProfile::temporary()?;
                let browser_config = Self::local_config(&config, &chrome, profile.path())?;

                tracing::info!("Launching Chrome from {}", chrome.display());
                let (browser, handler) = Browser::launch(browser_config).await?;
                (browser, handler, Some(profile))
            }
            Backend::Remote { endpoint, .. } => {
                let ws_url = config
                    .backend
                    .websocket_url()
                    .ok_or_else(|| Error::Browser("remote backend without endpoint".to_string()))?;

                tracing::info!("Connecting to remote browser at {}", endpoint);
                let (browser, handler) = Browser::connect(ws_url).await?;
                (browser, handler, None)
            }
        };

        // The handler must be polled for any command to complete
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = match Self::prepare_page(&browser, config.viewport).await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(e);
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
            config,
            closed: false,
            _profile: profile,
        })
    }

    fn local_config(config: &SessionConfig, chrome: &Path, profile: &Path) -> Result<BrowserConfig> {
        let Viewport { width, height } = config.viewport;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome)
            .user_data_dir(profile)
            .window_size(width, height)
            .viewport(CdpViewport {
                width,
                height,
                ..Default::default()
            })
            .request_timeout(config.navigation_timeout)
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--no-first-run")
            .arg("--no-default-browser-check");

        if !config.headless {
            builder = builder.with_head();
        }

        builder.build().map_err(Error::Browser)
    }

    async fn prepare_page(browser: &Browser, viewport: Viewport) -> Result<Page> {
        let page = browser.new_page("about:blank").await?;
        page.execute(SetDeviceMetricsOverrideParams::new(
            i64::from(viewport.width),
            i64::from(viewport.height),
            1.0,
            false,
        ))
        .await?;
        Ok(page)
    }

    /// Load `url`, failing with `Error::Navigation` on timeout or network error
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let timeout = self.config.navigation_timeout;
        tracing::info!("Navigating to {} (timeout {}s)", url, timeout.as_secs());

        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => {
                tracing::debug!("Navigation complete");
                Ok(())
            }
            Ok(Err(e)) => Err(Error::Navigation(format!("{}: {}", url, e))),
            Err(_) => Err(Error::Navigation(format!(
                "timed out after {}s loading {}",
                timeout.as_secs(),
                url
            ))),
        }
    }

    /// Snapshot collector for the current page
    pub fn page(&self) -> ChromePage {
        ChromePage::new(self.page.clone())
    }

    /// PNG of the current viewport
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        let png = self
            .page
            .screenshot(ScreenshotParams::builder().full_page(false).build())
            .await?;
        Ok(png)
    }

    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        tracing::debug!("Closing browser session");
        let closed = self.browser.close().await;
        if !self.config.backend.is_remote() {
            let _ = self.browser.wait().await;
        }
        self.handler.abort();

        closed.map(|_| ()).map_err(Error::from)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if !self.closed {
            tracing::debug!("Browser session dropped without close");
        }
        self.handler.abort();
    }
}
