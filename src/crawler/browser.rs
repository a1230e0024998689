use std::ffi::OsStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

/// Pause between scroll passes, to let lazy-loaded content come in.
const SCROLL_PAUSE: Duration = Duration::from_secs(1);
/// Bounded wait for the document body after navigation.
const READY_TIMEOUT: Duration = Duration::from_secs(2);

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// One headless Chrome instance owned for the process lifetime. The target
/// site is a React SPA, so a plain HTTP fetch returns an empty shell; pages
/// must be rendered and scrolled before their markup is parseable.
pub struct BrowserSession {
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch headless Chrome. This is the only fatal failure in the program.
    pub fn open() -> Result<Self> {
        let browser = Browser::new(LaunchOptions {
            headless: true,
            window_size: Some((1920, 1080)),
            args: vec![
                OsStr::new("--disable-extensions"),
                OsStr::new("--disable-infobars"),
            ],
            ..Default::default()
        })
        .context("failed to launch headless browser")?;

        let tab = browser.new_tab().context("failed to open browser tab")?;
        info!("Browser session opened");

        Ok(Self {
            browser: Some(browser),
            tab,
        })
    }

    /// Navigate and return the rendered markup, or None on any fetch/timeout
    /// error (logged, not raised). `scroll_passes` scroll-to-bottom rounds
    /// with a fixed pause each trigger lazy-loaded content first.
    pub async fn fetch_rendered(&self, url: &str, scroll_passes: u32) -> Option<String> {
        if self.browser.is_none() {
            warn!(url, "fetch_rendered called on a closed session");
            return None;
        }

        match self.try_fetch(url, scroll_passes).await {
            Ok(html) => Some(html),
            Err(e) => {
                error!(url, error = %e, "Failed to render page");
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str, scroll_passes: u32) -> Result<String> {
        self.tab.navigate_to(url)?;
        self.tab.wait_until_navigated()?;

        for _ in 0..scroll_passes {
            self.tab.evaluate(SCROLL_TO_BOTTOM, false)?;
            sleep(SCROLL_PAUSE).await;
        }

        self.tab
            .wait_for_element_with_custom_timeout("body", READY_TIMEOUT)?;

        Ok(self.tab.get_content()?)
    }

    /// Release the browser process. Idempotent; also runs on Drop so the
    /// process is reclaimed on every exit path.
    pub fn close(&mut self) {
        if let Some(browser) = self.browser.take() {
            drop(browser);
            info!("Browser session closed");
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.close();
    }
}
