//! Session authentication.
//!
//! Login state lives in the browser profile and is shared by every page,
//! so whoever logs in or out last wins; the engine does not serialize
//! concurrent session mutations. Hosts drive them from a single surface.

use std::time::Duration;

use tracing::{debug, info};

use crate::browser::{BrowserSession, PageHandle};
use crate::config::Config;
use crate::model::AccountSession;
use crate::page::header::{self, HasHeader as _, HeaderView};
use crate::page::{enter, profile};
use crate::{Error, Result};

pub struct SessionAuthenticator<'a> {
    session: &'a BrowserSession,
    conf: &'a Config,
}

impl<'a> SessionAuthenticator<'a> {
    pub fn new(session: &'a BrowserSession, conf: &'a Config) -> Self {
        Self { session, conf }
    }

    fn timeout(&self) -> Duration {
        self.conf.navigation_timeout()
    }

    /// Login state of the page, which must already be on a site page; this
    /// never navigates.
    pub async fn check_status(&self, page: &dyn PageHandle) -> Result<Option<String>> {
        page.wait_for(header::login_status(), self.timeout()).await?;
        let html = page.html().await?;
        HeaderView::parse(&html).current_handle()
    }

    /// Clicks the header logout control. With `check_first`, an already
    /// anonymous session is left alone.
    pub async fn logout(&self, page: &dyn PageHandle, check_first: bool) -> Result<()> {
        if check_first && self.check_status(page).await?.is_none() {
            debug!("logout skipped, session already anonymous");
            return Ok(());
        }
        page.click(header::logout_link()).await?;
        page.wait_for_navigation().await?;
        info!("logged out");
        Ok(())
    }

    /// Logs in as `account` and returns the profile snapshot.
    ///
    /// If the same account is already authenticated the form is skipped
    /// outright. If another account is authenticated it is logged out
    /// first and stays logged out even when the new login then fails.
    pub async fn login(&self, account: &str, password: &str) -> Result<AccountSession> {
        if account.is_empty() || password.is_empty() {
            return Err(Error::AccountAndPasswordRequired);
        }
        self.session
            .with_page(|page| async move { self.login_on(&*page, account, password).await })
            .await
    }

    async fn login_on(
        &self,
        page: &dyn PageHandle,
        account: &str,
        password: &str,
    ) -> Result<AccountSession> {
        page.goto(&enter::url()?).await?;
        match self.check_status(page).await?.as_deref() {
            Some(current) if current == account => {
                debug!(%account, "already logged in, skipping the login form");
            }
            Some(other) => {
                info!(current = %other, "another account is logged in, logging it out first");
                self.logout(page, false).await?;
                page.goto(&enter::url()?).await?;
                self.submit_credentials(page, account, password).await?;
            }
            None => self.submit_credentials(page, account, password).await?,
        }

        // The header is the ground truth for whether the site accepted the
        // credentials.
        let handle = self
            .check_status(page)
            .await?
            .ok_or_else(|| Error::LoginFailed {
                account: account.to_owned(),
            })?;
        self.fetch_profile(page, &handle).await
    }

    /// Fills and submits the login form. The page must be on `/enter`.
    async fn submit_credentials(
        &self,
        page: &dyn PageHandle,
        account: &str,
        password: &str,
    ) -> Result<()> {
        page.wait_for(enter::handle_input(), self.timeout()).await?;
        page.type_into(enter::handle_input(), account).await?;
        page.type_into(enter::password_input(), password).await?;
        page.click(enter::submit_button()).await?;
        page.wait_for_navigation().await?;
        Ok(())
    }

    async fn fetch_profile(&self, page: &dyn PageHandle, handle: &str) -> Result<AccountSession> {
        page.goto(&profile::url(handle)?).await?;
        page.wait_for(profile::info_root(), self.timeout()).await?;
        let html = page.html().await?;
        let session = profile::ProfilePage::parse(&html).extract_session(handle)?;
        info!(%handle, "logged in");
        Ok(session)
    }
}
