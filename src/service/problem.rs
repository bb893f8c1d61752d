//! Problem statement reads.

use tracing::debug;

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::model::{ContestId, ProblemDetail, ProblemIndex};
use crate::page::problem;
use crate::{Error, Result};

pub struct ProblemDetailFetcher<'a> {
    session: &'a BrowserSession,
    conf: &'a Config,
}

impl<'a> ProblemDetailFetcher<'a> {
    pub fn new(session: &'a BrowserSession, conf: &'a Config) -> Self {
        Self { session, conf }
    }

    /// Fetches the statement fragments of one problem.
    pub async fn fetch(
        &self,
        contest_id: ContestId,
        index: &ProblemIndex,
    ) -> Result<ProblemDetail> {
        if contest_id.as_u64() == 0 || index.as_str().trim().is_empty() {
            return Err(Error::ParamsUndefined {
                detail: format!(
                    "contestId and problemIndex are both required\nReceived: contestId={}, problemIndex={:?}",
                    contest_id,
                    index.as_str()
                ),
            });
        }
        let timeout = self.conf.navigation_timeout();
        let detail = self
            .session
            .with_page(|page| async move {
                page.goto(&problem::url(contest_id, index)?).await?;
                // A looping wait cannot tell "not yet rendered" from "does
                // not exist"; on expiry the missing statement names the
                // problem rather than the fragment.
                page.wait_for(problem::statement_root(), timeout)
                    .await
                    .map_err(|err| match err {
                        Error::ElementNotFound { .. } => Error::ProblemStatementNotFound {
                            contest_id,
                            problem_index: index.clone(),
                        },
                        err => err,
                    })?;
                let html = page.html().await?;
                problem::ProblemPage::parse(&html).extract_detail(contest_id, index)
            })
            .await
            .map_err(|err| err.into_request_detail(contest_id, index.clone()))?;
        debug!(contest = %contest_id, problem = %index, "fetched problem detail");
        Ok(detail)
    }
}
