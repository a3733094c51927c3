//! Browser lifecycle over the Chrome DevTools Protocol.
//!
//! One [`Browser`] owns a Chromium process; each scenario gets its own tab
//! through [`Browser::new_handle`]. The CDP message loop runs on a spawned
//! task for the lifetime of the browser.

use std::sync::Arc;

use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use futures::StreamExt;
use tokio::sync::Mutex;

use crate::driver::DriverHandle;
use crate::result::{VitrinaError, VitrinaResult};

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to a Chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the Chromium binary path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Configuration from the environment: `VITRINA_CHROME` for the binary,
    /// `VITRINA_HEADED=1` for a visible window, `VITRINA_NO_SANDBOX=1` for
    /// container use.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("VITRINA_CHROME") {
            if !path.trim().is_empty() {
                config.chromium_path = Some(path);
            }
        }
        if std::env::var("VITRINA_HEADED").is_ok_and(|v| v == "1") {
            config.headless = false;
        }
        if std::env::var("VITRINA_NO_SANDBOX").is_ok_and(|v| v == "1") {
            config.sandbox = false;
        }
        config
    }
}

/// A running Chromium instance.
#[derive(Debug)]
pub struct Browser {
    config: BrowserConfig,
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a browser with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::BrowserLaunch`] if the process cannot start.
    pub async fn launch(config: BrowserConfig) -> VitrinaResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|message| VitrinaError::BrowserLaunch { message })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| VitrinaError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        tracing::debug!(headless = config.headless, "browser launched");

        Ok(Self {
            config,
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a fresh tab and hand out its driver handle.
    ///
    /// Each scenario must own its handle exclusively; handles share nothing
    /// but the browser process.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab cannot be created.
    pub async fn new_handle(&self, base_url: impl Into<String>) -> VitrinaResult<DriverHandle> {
        let browser = self.inner.lock().await;
        let page = browser.new_page("about:blank").await?;
        Ok(DriverHandle::new(Arc::new(page), base_url))
    }

    /// Get the browser configuration
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Close the browser and its tabs.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser refuses to shut down.
    pub async fn close(self) -> VitrinaResult<()> {
        let mut browser = self.inner.lock().await;
        browser.close().await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_headless() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert!(config.chromium_path.is_none());
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.viewport_height, 720);
    }

    #[test]
    fn builder_chain() {
        let config = BrowserConfig::default()
            .with_viewport(800, 600)
            .with_headless(false)
            .with_chromium_path("/usr/bin/chromium")
            .with_no_sandbox();

        assert_eq!(config.viewport_width, 800);
        assert_eq!(config.viewport_height, 600);
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }
}
