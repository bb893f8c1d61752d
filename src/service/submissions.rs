//! Submission history reads.

use tracing::debug;

use crate::browser::{BrowserSession, PageHandle};
use crate::config::Config;
use crate::model::{ContestId, SubmissionRecord};
use crate::page::status;
use crate::service::SessionAuthenticator;
use crate::{Error, Result};

pub struct SubmissionHistoryReader<'a> {
    session: &'a BrowserSession,
    conf: &'a Config,
}

impl<'a> SubmissionHistoryReader<'a> {
    pub fn new(session: &'a BrowserSession, conf: &'a Config) -> Self {
        Self { session, conf }
    }

    /// Reads every row of the submissions table on `page`, which must
    /// already be on a my-submissions page.
    pub async fn read_all(&self, page: &dyn PageHandle) -> Result<Vec<SubmissionRecord>> {
        page.wait_for(status::submissions_table(), self.conf.navigation_timeout())
            .await?;
        let html = page.html().await?;
        status::StatusPage::parse(&html).extract_submissions()
    }

    /// Standalone query for one contest's submissions.
    ///
    /// With `check_login` an anonymous session fails before any table is
    /// read; pass `false` only when the caller has just verified the
    /// session itself.
    pub async fn fetch(
        &self,
        contest_id: ContestId,
        check_login: bool,
    ) -> Result<Vec<SubmissionRecord>> {
        if contest_id.as_u64() == 0 {
            return Err(Error::ContestIdRequired);
        }
        let records = self
            .session
            .with_page(|page| async move {
                page.goto(&status::url(contest_id)?).await?;
                if check_login {
                    let auth = SessionAuthenticator::new(self.session, self.conf);
                    if auth.check_status(&*page).await?.is_none() {
                        return Err(Error::LoggedInAccountRequired {
                            detail: "Must log in an account to acquire submission info",
                        });
                    }
                }
                self.read_all(&*page).await
            })
            .await
            .map_err(|err| err.into_request_submission_info(contest_id))?;
        debug!(contest = %contest_id, count = records.len(), "fetched submissions");
        Ok(records)
    }
}
