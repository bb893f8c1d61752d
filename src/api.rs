//! The boundary surface the host application calls.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::model::{
    AccountSession, ContestId, ContestSummary, HistoricalContest, ProblemDetail, ProblemIndex,
    ProblemSummary, SubmissionRecord,
};
use crate::page;
use crate::service::{
    ContestCatalog, ProblemDetailFetcher, SessionAuthenticator, SubmissionHistoryReader,
    SubmissionWorkflow,
};
use crate::store::{paths, KeyValueStore, SessionNotifier};
use crate::{Error, Result};

/// Per-login side effects. Both default to on; hosts doing background
/// re-logins turn them off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOptions {
    /// Update the stored account record after a successful login.
    pub update_storage: bool,
    /// Send the session-changed signal after a successful login.
    pub trigger_refresh: bool,
}

impl Default for LoginOptions {
    fn default() -> Self {
        Self {
            update_storage: true,
            trigger_refresh: true,
        }
    }
}

/// One answer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub contest_id: ContestId,
    pub problem_index: ProblemIndex,
    pub source_code: String,
    /// Submit-form language code. `None` falls back to the host's stored
    /// default, then to the configured default.
    pub language_code: Option<u32>,
}

/// The automation engine.
///
/// One instance owns one shared headless browser; every operation opens
/// its own scratch page and operations may run concurrently. Login state
/// is profile-wide, so concurrent login/logout calls race (last writer
/// wins) and hosts are expected to drive session changes from a single
/// surface.
pub struct Codeforces {
    conf: Config,
    session: BrowserSession,
    store: Option<Arc<dyn KeyValueStore>>,
    notifier: Option<Arc<dyn SessionNotifier>>,
}

impl Codeforces {
    /// Engine over a headless browser configured by `conf`. The browser
    /// launches lazily on the first operation.
    pub fn new(conf: Config) -> Self {
        let session = BrowserSession::headless(&conf);
        Self::with_session(conf, session)
    }

    /// Engine over a custom browser session.
    pub fn with_session(conf: Config, session: BrowserSession) -> Self {
        Self {
            conf,
            session,
            store: None,
            notifier: None,
        }
    }

    /// Attaches the host's key-value store.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Attaches the host's session-change notifier.
    pub fn notifier(mut self, notifier: Arc<dyn SessionNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn config(&self) -> &Config {
        &self.conf
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    /// Upcoming contests.
    pub async fn contest_list(&self) -> Result<Vec<ContestSummary>> {
        self.catalog().list_upcoming().await
    }

    /// Finished contests with their numeric ids.
    pub async fn history_contest_list(&self) -> Result<Vec<HistoricalContest>> {
        self.catalog().list_history().await
    }

    /// Problems of one contest.
    pub async fn contest_problems(&self, contest_id: ContestId) -> Result<Vec<ProblemSummary>> {
        self.catalog().problems(contest_id).await
    }

    /// Statement fragments of one problem.
    pub async fn problem_detail(
        &self,
        contest_id: ContestId,
        problem_index: &ProblemIndex,
    ) -> Result<ProblemDetail> {
        ProblemDetailFetcher::new(&self.session, &self.conf)
            .fetch(contest_id, problem_index)
            .await
    }

    /// Submission rows of one contest, newest first. `check_login` should
    /// stay on unless the caller just verified the session itself.
    pub async fn contest_submissions(
        &self,
        contest_id: ContestId,
        check_login: bool,
    ) -> Result<Vec<SubmissionRecord>> {
        SubmissionHistoryReader::new(&self.session, &self.conf)
            .fetch(contest_id, check_login)
            .await
    }

    /// Logs in with the default side effects.
    pub async fn login(&self, account: &str, password: &str) -> Result<AccountSession> {
        self.login_with(account, password, LoginOptions::default())
            .await
    }

    pub async fn login_with(
        &self,
        account: &str,
        password: &str,
        options: LoginOptions,
    ) -> Result<AccountSession> {
        let session = SessionAuthenticator::new(&self.session, &self.conf)
            .login(account, password)
            .await?;
        if options.update_storage {
            self.write_account_info(account, password, &session).await?;
        }
        if options.trigger_refresh {
            self.notify_session_changed();
        }
        Ok(session)
    }

    /// Logs out if any account is authenticated, clears the stored session
    /// snapshot and notifies.
    pub async fn logout(&self) -> Result<()> {
        let auth = SessionAuthenticator::new(&self.session, &self.conf);
        self.session
            .with_page(|page| async move {
                page.goto(&page::home_url()?).await?;
                auth.logout(&*page, true).await
            })
            .await?;
        self.clear_account_info().await?;
        self.notify_session_changed();
        Ok(())
    }

    /// Currently authenticated handle, if any.
    pub async fn current_handle(&self) -> Result<Option<String>> {
        let auth = SessionAuthenticator::new(&self.session, &self.conf);
        self.session
            .with_page(|page| async move {
                page.goto(&page::home_url()?).await?;
                auth.check_status(&*page).await
            })
            .await
    }

    /// Submits an answer and returns the contest's submission rows once
    /// the verdict settles.
    pub async fn submit(&self, request: &SubmitRequest) -> Result<Vec<SubmissionRecord>> {
        let code = self.resolve_language_code(request.language_code).await?;
        SubmissionWorkflow::new(&self.session, &self.conf)
            .submit(
                request.contest_id,
                &request.problem_index,
                &request.source_code,
                code,
            )
            .await
    }

    /// Shuts the shared browser down. Call once at host shutdown.
    pub async fn shutdown(&self) -> Result<()> {
        self.session.shutdown().await
    }

    fn catalog(&self) -> ContestCatalog<'_> {
        ContestCatalog::new(&self.session, &self.conf)
    }

    /// Explicit request value, then the host's stored default, then the
    /// configured default.
    async fn resolve_language_code(&self, requested: Option<u32>) -> Result<u32> {
        if let Some(code) = requested {
            return Ok(code);
        }
        if let Some(store) = &self.store {
            if let Some(settings) = store.get(paths::SETTINGS_INFO).await? {
                if let Some(code) = settings
                    .get("defaultSubmitLangValue")
                    .and_then(|value| value.as_u64())
                {
                    return Ok(code as u32);
                }
            }
        }
        self.conf
            .default_language()
            .ok_or_else(|| Error::ParamsUndefined {
                detail: "languageCode is required when no default submission language is stored or configured"
                    .to_owned(),
            })
    }

    async fn write_account_info(
        &self,
        account: &str,
        password: &str,
        session: &AccountSession,
    ) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let record = json!({
            "account": account,
            "password": password,
            "handle": session.handle(),
            "ratings": session.rating(),
            "levelName": session.level_name(),
            "avatarUrl": session.avatar_url(),
        });
        store.set(paths::ACCOUNT_INFO, record).await?;
        info!("stored account info");
        Ok(())
    }

    /// Clears the session fields of the stored record but keeps the
    /// credentials, so the host can offer a re-login.
    async fn clear_account_info(&self) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let mut record = store
            .get(paths::ACCOUNT_INFO)
            .await?
            .unwrap_or_else(|| json!({}));
        if let Some(map) = record.as_object_mut() {
            for key in ["handle", "ratings", "levelName", "avatarUrl"] {
                map.insert(key.to_owned(), serde_json::Value::Null);
            }
        }
        store.set(paths::ACCOUNT_INFO, record).await
    }

    fn notify_session_changed(&self) {
        if let Some(notifier) = &self.notifier {
            notifier.session_changed();
        }
    }
}
