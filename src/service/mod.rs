//! Operation components over the shared browser session.
//!
//! Services drive scratch pages, snapshot them and hand the HTML to the
//! page extractors. Every public operation applies the boundary policy:
//! transport and parse failures get wrapped into the operation's request
//! kind, taxonomy kinds pass through unchanged.

mod auth;
mod contests;
mod problem;
mod submissions;
mod submit;

pub use auth::SessionAuthenticator;
pub use contests::ContestCatalog;
pub use problem::ProblemDetailFetcher;
pub use submissions::SubmissionHistoryReader;
pub use submit::SubmissionWorkflow;

use std::time::Duration;

use url::Url;

use crate::browser::PageHandle;
use crate::scrape::Fragment;
use crate::Result;

/// Navigates to `url`, waits for the page-ready marker and snapshots the
/// DOM.
pub(crate) async fn snapshot(
    page: &dyn PageHandle,
    url: &Url,
    ready: &Fragment,
    timeout: Duration,
) -> Result<String> {
    page.goto(url).await?;
    page.wait_for(ready, timeout).await?;
    page.html().await
}
