//! Browser backends and the shared session.
//!
//! One headless browser process backs every operation; each operation
//! opens its own scratch page and closes it on every exit path. The
//! backend sits behind traits so tests drive the full workflows against a
//! scripted fake instead of a real browser.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::warn;
use url::Url;

use crate::scrape::Fragment;
use crate::Result;

pub mod chromium;

/// Launches a browser process. Implemented by the chromium backend and by
/// test fakes.
#[async_trait]
pub trait Launch: Send + Sync {
    async fn launch(&self) -> Result<Arc<dyn BrowserHandle>>;
}

/// A running browser: a factory of scratch pages.
#[async_trait]
pub trait BrowserHandle: Send + Sync {
    async fn open_page(&self) -> Result<Arc<dyn PageHandle>>;

    /// Closes the browser process. Called once at host shutdown.
    async fn shutdown(&self) -> Result<()>;
}

/// One scratch page. DOM reads go through [`html`](PageHandle::html)
/// snapshots; interactions target fragments by selector.
#[async_trait]
pub trait PageHandle: Send + Sync {
    async fn goto(&self, url: &Url) -> Result<()>;

    /// Waits until `fragment` is attached, bounded by `timeout`. Reports
    /// the missing fragment by name on expiry.
    async fn wait_for(&self, fragment: &Fragment, timeout: Duration) -> Result<()>;

    /// Serializes the page's current DOM.
    async fn html(&self) -> Result<String>;

    async fn click(&self, fragment: &Fragment) -> Result<()>;

    async fn type_into(&self, fragment: &Fragment, text: &str) -> Result<()>;

    /// Sets a `<select>` control to `value` and fires its change event.
    async fn select_value(&self, fragment: &Fragment, value: &str) -> Result<()>;

    /// Waits for the navigation triggered by a preceding interaction to
    /// settle.
    async fn wait_for_navigation(&self) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// The shared browser session.
///
/// The browser launches lazily on first use with a single-flight guard, so
/// concurrent first operations share one launch instead of racing. Login
/// state lives in the browser profile and is visible to every page: a
/// login or logout on one page is observed by all pages opened after it.
/// The session does not serialize concurrent session mutations; the last
/// writer wins.
pub struct BrowserSession {
    launcher: Box<dyn Launch>,
    handle: OnceCell<Arc<dyn BrowserHandle>>,
}

impl BrowserSession {
    /// Session backed by a headless chromium configured by `conf`.
    pub fn headless(conf: &crate::Config) -> Self {
        Self::with_launcher(Box::new(chromium::ChromiumLauncher::new(conf)))
    }

    /// Session over a custom backend.
    pub fn with_launcher(launcher: Box<dyn Launch>) -> Self {
        Self {
            launcher,
            handle: OnceCell::new(),
        }
    }

    /// Returns the shared browser, launching it on first call.
    pub async fn acquire(&self) -> Result<&Arc<dyn BrowserHandle>> {
        self.handle
            .get_or_try_init(|| self.launcher.launch())
            .await
    }

    /// Opens a scratch page on the shared browser.
    pub async fn open_page(&self) -> Result<Arc<dyn PageHandle>> {
        self.acquire().await?.open_page().await
    }

    /// Runs `f` with a scratch page and closes the page on every exit
    /// path. A close failure is logged and never masks the operation
    /// result.
    pub async fn with_page<T, Fut>(
        &self,
        f: impl FnOnce(Arc<dyn PageHandle>) -> Fut,
    ) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let page = self.open_page().await?;
        let result = f(Arc::clone(&page)).await;
        if let Err(err) = page.close().await {
            warn!("failed to close scratch page: {}", err);
        }
        result
    }

    /// Shuts the browser down if it was ever launched.
    pub async fn shutdown(&self) -> Result<()> {
        match self.handle.get() {
            Some(handle) => handle.shutdown().await,
            None => Ok(()),
        }
    }
}

impl fmt::Debug for BrowserSession {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BrowserSession")
            .field("launched", &self.handle.initialized())
            .finish()
    }
}
