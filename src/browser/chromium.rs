//! chromiumoxide backend.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt as _;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::scrape::Fragment;
use crate::{Error, Result};

use super::{BrowserHandle, Launch, PageHandle};

/// How often a fragment wait re-probes the page.
const WAIT_PROBE_INTERVAL: Duration = Duration::from_millis(100);

/// Flags for running chromium unattended.
static LAUNCH_ARGS: &[&str] = &[
    "--disable-gpu",
    "--no-first-run",
    "--no-default-browser-check",
    "--disable-dev-shm-usage",
    "--disable-background-networking",
];

/// Launches a headless chromium with a persistent profile. The profile
/// directory keeps the login cookies, so sessions survive host restarts.
pub struct ChromiumLauncher {
    profile_dir: PathBuf,
    browser_exe: Option<PathBuf>,
}

impl ChromiumLauncher {
    pub fn new(conf: &Config) -> Self {
        Self {
            profile_dir: conf.profile_dir().clone(),
            browser_exe: conf.browser_exe().clone(),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .new_headless_mode()
            .no_sandbox()
            .user_data_dir(&self.profile_dir)
            .args(LAUNCH_ARGS.iter().copied());
        if let Some(exe) = &self.browser_exe {
            builder = builder.chrome_executable(exe);
        }
        builder.build().map_err(|detail| Error::BrowserLaunchFailed { detail })
    }
}

#[async_trait]
impl Launch for ChromiumLauncher {
    async fn launch(&self) -> Result<Arc<dyn BrowserHandle>> {
        let config = self.browser_config()?;
        let (browser, mut handler) = Browser::launch(config).await.map_err(Error::launch)?;
        // The handler stream must be drained for the whole browser
        // lifetime; CDP errors on it are diagnostics, not failures.
        let events: JoinHandle<()> = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!("browser event error: {}", err);
                }
            }
        });
        info!(profile_dir = %self.profile_dir.display(), "launched headless browser");
        Ok(Arc::new(ChromiumBrowser {
            browser: Mutex::new(browser),
            events,
        }))
    }
}

struct ChromiumBrowser {
    browser: Mutex<Browser>,
    events: JoinHandle<()>,
}

#[async_trait]
impl BrowserHandle for ChromiumBrowser {
    async fn open_page(&self) -> Result<Arc<dyn PageHandle>> {
        let page = self
            .browser
            .lock()
            .await
            .new_page("about:blank")
            .await
            .map_err(Error::page)?;
        Ok(Arc::new(ChromiumPage { page }))
    }

    async fn shutdown(&self) -> Result<()> {
        self.browser.lock().await.close().await.map_err(Error::page)?;
        self.events.abort();
        info!("closed headless browser");
        Ok(())
    }
}

struct ChromiumPage {
    page: Page,
}

#[async_trait]
impl PageHandle for ChromiumPage {
    async fn goto(&self, url: &Url) -> Result<()> {
        self.page.goto(url.as_str()).await.map_err(Error::page)?;
        Ok(())
    }

    async fn wait_for(&self, fragment: &Fragment, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.page.find_element(fragment.source()).await.is_ok() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(Error::ElementNotFound {
                    element: fragment.name(),
                });
            }
            sleep(WAIT_PROBE_INTERVAL).await;
        }
    }

    async fn html(&self) -> Result<String> {
        self.page.content().await.map_err(Error::page)
    }

    async fn click(&self, fragment: &Fragment) -> Result<()> {
        self.find(fragment).await?.click().await.map_err(Error::page)?;
        Ok(())
    }

    async fn type_into(&self, fragment: &Fragment, text: &str) -> Result<()> {
        let element = self.find(fragment).await?;
        element.click().await.map_err(Error::page)?;
        element.type_str(text).await.map_err(Error::page)?;
        Ok(())
    }

    async fn select_value(&self, fragment: &Fragment, value: &str) -> Result<()> {
        // Drive the <select> through the DOM: option values are stable
        // while visible labels change with compiler updates.
        let js = format!(
            r#"(function() {{
                const el = document.querySelector({selector:?});
                if (!el) return false;
                el.value = {value:?};
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return el.value === {value:?};
            }})()"#,
            selector = fragment.source(),
            value = value,
        );
        let found: bool = self
            .page
            .evaluate(js)
            .await
            .map_err(Error::page)?
            .into_value()
            .map_err(Error::page)?;
        if !found {
            return Err(Error::ElementNotFound {
                element: fragment.name(),
            });
        }
        Ok(())
    }

    async fn wait_for_navigation(&self) -> Result<()> {
        self.page.wait_for_navigation().await.map_err(Error::page)?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.page.clone().close().await.map_err(Error::page)?;
        Ok(())
    }
}

impl ChromiumPage {
    async fn find(&self, fragment: &Fragment) -> Result<chromiumoxide::Element> {
        self.page
            .find_element(fragment.source())
            .await
            .map_err(|_| Error::ElementNotFound {
                element: fragment.name(),
            })
    }
}
