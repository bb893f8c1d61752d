//! The submission workflow: login gate, language, source, submit, judge
//! wait.

use tokio::time::sleep;
use tracing::{debug, info};

use crate::browser::{BrowserSession, PageHandle};
use crate::config::Config;
use crate::model::{ContestId, ProblemIndex, SubmissionRecord, SupportedLanguage};
use crate::page::{status, submit};
use crate::service::{SessionAuthenticator, SubmissionHistoryReader};
use crate::{lang, Error, Result};

pub struct SubmissionWorkflow<'a> {
    session: &'a BrowserSession,
    conf: &'a Config,
}

impl<'a> SubmissionWorkflow<'a> {
    pub fn new(session: &'a BrowserSession, conf: &'a Config) -> Self {
        Self { session, conf }
    }

    /// Drives one submission end to end and returns the contest's visible
    /// submission rows once the newest verdict settles.
    ///
    /// Order of steps: input validation and catalog lookup before any page
    /// opens, then the authenticated-session gate, form entry, submit
    /// paired with its navigation, a single duplicate-code check, and the
    /// bounded judging poll.
    pub async fn submit(
        &self,
        contest_id: ContestId,
        index: &ProblemIndex,
        source_code: &str,
        language_code: u32,
    ) -> Result<Vec<SubmissionRecord>> {
        if contest_id.as_u64() == 0 {
            return Err(Error::ContestIdRequired);
        }
        if index.as_str().trim().is_empty() || source_code.is_empty() {
            return Err(Error::ParamsUndefined {
                detail: format!(
                    "problemIndex and sourceCode are both required\nReceived: problemIndex={:?}, sourceCode length={}",
                    index.as_str(),
                    source_code.len()
                ),
            });
        }
        let language = lang::find_language(language_code)
            .ok_or(Error::LanguageNotFound {
                code: language_code,
            })?;

        let records = self
            .session
            .with_page(|page| async move {
                self.submit_on(&*page, contest_id, index, source_code, language)
                    .await
            })
            .await
            .map_err(Error::into_answer_submission_failed)?;
        info!(contest = %contest_id, problem = %index, "submission finished");
        Ok(records)
    }

    async fn submit_on(
        &self,
        page: &dyn PageHandle,
        contest_id: ContestId,
        index: &ProblemIndex,
        source_code: &str,
        language: &SupportedLanguage,
    ) -> Result<Vec<SubmissionRecord>> {
        let timeout = self.conf.navigation_timeout();
        page.goto(&submit::url(contest_id, index)?).await?;

        let auth = SessionAuthenticator::new(self.session, self.conf);
        let handle = auth
            .check_status(page)
            .await?
            .ok_or(Error::LoggedInAccountRequired {
                detail: "Must log in an account to submit answers",
            })?;
        debug!(%handle, language = language.name(), "filling the submit form");

        page.wait_for(submit::language_select(), timeout).await?;
        page.select_value(submit::language_select(), &language.code().to_string())
            .await?;
        page.type_into(submit::source_input(), source_code).await?;

        // The click and the navigation form one step: the site
        // acknowledges a submission by navigating to the my-submissions
        // page.
        page.click(submit::submit_button()).await?;
        page.wait_for_navigation().await?;

        // A duplicate re-renders the form instead of navigating; checked
        // once, before any polling.
        let html = page.html().await?;
        if submit::SubmitPage::parse(&html).has_duplicate_notice() {
            return Err(Error::SameCodeSubmitted);
        }

        self.wait_for_verdict(page).await?;
        SubmissionHistoryReader::new(self.session, self.conf)
            .read_all(page)
            .await
    }

    /// Polls the newest row's waiting flag until it clears or the policy
    /// budget runs out.
    async fn wait_for_verdict(&self, page: &dyn PageHandle) -> Result<()> {
        let policy = self.conf.poll();
        page.wait_for(status::submissions_table(), self.conf.navigation_timeout())
            .await?;
        for attempt in 1..=policy.max_attempts() {
            let html = page.html().await?;
            if !status::StatusPage::parse(&html).latest_is_waiting()? {
                debug!(attempt, "verdict settled");
                return Ok(());
            }
            debug!(attempt, "still judging");
            sleep(policy.interval()).await;
        }
        Err(Error::AnswerTestingTimeOut {
            attempts: policy.max_attempts(),
        })
    }
}
