//! Contest catalog reads: listings and per-contest problem tables.

use tracing::debug;

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::model::{ContestId, ContestSummary, HistoricalContest, ProblemSummary};
use crate::page::{contests, problems};
use crate::service::snapshot;
use crate::{Error, Result};

pub struct ContestCatalog<'a> {
    session: &'a BrowserSession,
    conf: &'a Config,
}

impl<'a> ContestCatalog<'a> {
    pub fn new(session: &'a BrowserSession, conf: &'a Config) -> Self {
        Self { session, conf }
    }

    /// Upcoming contests. An empty table is a valid empty listing.
    pub async fn list_upcoming(&self) -> Result<Vec<ContestSummary>> {
        let timeout = self.conf.navigation_timeout();
        let list = self
            .session
            .with_page(|page| async move {
                let html =
                    snapshot(&*page, &contests::url()?, contests::upcoming_table(), timeout)
                        .await?;
                contests::ContestsPage::parse(&html).extract_upcoming()
            })
            .await
            .map_err(Error::into_request_info)?;
        debug!(count = list.len(), "fetched upcoming contests");
        Ok(list)
    }

    /// Finished contests with their numeric ids.
    pub async fn list_history(&self) -> Result<Vec<HistoricalContest>> {
        let timeout = self.conf.navigation_timeout();
        let list = self
            .session
            .with_page(|page| async move {
                let html =
                    snapshot(&*page, &contests::url()?, contests::history_table(), timeout)
                        .await?;
                contests::ContestsPage::parse(&html).extract_history()
            })
            .await
            .map_err(Error::into_request_info)?;
        debug!(count = list.len(), "fetched contest history");
        Ok(list)
    }

    /// Problems of one contest.
    pub async fn problems(&self, contest_id: ContestId) -> Result<Vec<ProblemSummary>> {
        if contest_id.as_u64() == 0 {
            return Err(Error::ContestIdRequired);
        }
        let timeout = self.conf.navigation_timeout();
        let list = self
            .session
            .with_page(|page| async move {
                let html = snapshot(
                    &*page,
                    &problems::url(contest_id)?,
                    problems::problems_table(),
                    timeout,
                )
                .await?;
                problems::ProblemsPage::parse(&html).extract_problems(contest_id)
            })
            .await
            .map_err(Error::into_request_problems)?;
        debug!(contest = %contest_id, count = list.len(), "fetched contest problems");
        Ok(list)
    }
}
